//! The generated program: a flat statement sequence and its rendering.

/// One emitted statement of a generated flow program.
///
/// Keeping statements structured (instead of raw text) lets callers and
/// tests inspect what was emitted (construction counts, wiring endpoints)
/// without parsing source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// `let <name> = <rust_path>::new(<args>);`
    Construct {
        name: String,
        rust_path: String,
        args: Vec<String>,
    },
    /// Default: `<from>.<port>.add_target(<to>.<port>.method());`
    /// With a hook: `<from>.<hook>("<port>", <to>.<port>.method());`
    Wire {
        from_node: String,
        from_port: String,
        hook: Option<String>,
        to_node: String,
        to_port: String,
    },
    /// `<node>.<port>.invoke((), &cancel).await?;`
    Invoke { node: String, port: String },
}

impl Statement {
    /// Render this statement as a line of Rust.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Statement::Construct {
                name,
                rust_path,
                args,
            } => {
                format!("let {name} = {rust_path}::new({});", args.join(", "))
            }
            Statement::Wire {
                from_node,
                from_port,
                hook: None,
                to_node,
                to_port,
            } => {
                format!("{from_node}.{from_port}.add_target({to_node}.{to_port}.method());")
            }
            Statement::Wire {
                from_node,
                from_port,
                hook: Some(hook),
                to_node,
                to_port,
            } => {
                format!("{from_node}.{hook}({from_port:?}, {to_node}.{to_port}.method());")
            }
            Statement::Invoke { node, port } => {
                format!("{node}.{port}.invoke((), &cancel).await?;")
            }
        }
    }
}

/// The compiled form of one graph: a single top-level type implementing
/// [`CompiledFlow`](crate::CompiledFlow).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedProgram {
    /// Id of the source graph; names the generated file.
    pub graph_id: String,
    /// Display name of the source graph.
    pub graph_name: String,
    /// Name of the emitted type; recorded back onto the graph as its
    /// flow-type association.
    pub type_name: String,
    /// Emitted statements in order: constructions and wiring interleaved by
    /// the traversal, then the final enter invocation.
    pub statements: Vec<Statement>,
}

impl GeneratedProgram {
    /// Construction statements, in emission order.
    pub fn constructs(&self) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(|statement| matches!(statement, Statement::Construct { .. }))
    }

    /// Wiring statements, in emission order.
    pub fn wires(&self) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(|statement| matches!(statement, Statement::Wire { .. }))
    }

    /// Render the complete generated source file.
    #[must_use]
    pub fn source(&self) -> String {
        let mut out = String::new();
        out.push_str(
            "//------------------------------------------------------------------------------\n",
        );
        out.push_str("// <auto-generated>\n");
        out.push_str(&format!(
            "//     This code was generated by flowgraph from graph \"{}\".\n",
            self.graph_name
        ));
        out.push_str("//\n");
        out.push_str(
            "//     Changes to this file may cause incorrect behavior and will be lost if\n",
        );
        out.push_str("//     the code is regenerated.\n");
        out.push_str("// </auto-generated>\n");
        out.push_str(
            "//------------------------------------------------------------------------------\n\n",
        );

        out.push_str(&format!("pub struct {};\n\n", self.type_name));
        out.push_str("#[async_trait::async_trait]\n");
        out.push_str(&format!(
            "impl flowgraph::CompiledFlow for {} {{\n",
            self.type_name
        ));
        out.push_str("    #[allow(unused_variables)]\n");
        out.push_str("    async fn run(\n");
        out.push_str("        &self,\n");
        out.push_str("        inject: &flowgraph::Injector,\n");
        out.push_str("        cancel: tokio_util::sync::CancellationToken,\n");
        out.push_str("    ) -> Result<(), flowgraph::FlowError> {\n");
        for statement in &self.statements {
            out.push_str("        ");
            out.push_str(&statement.render());
            out.push('\n');
        }
        out.push_str("        Ok(())\n");
        out.push_str("    }\n");
        out.push_str("}\n");
        out
    }
}
