//! Parsed representation of a bench netlist.

/// A parsed netlist: statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Netlist {
    pub statements: Vec<Statement>,
}

/// One bench statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `INPUT(name)`
    Input(String),
    /// `OUTPUT(name)`
    Output(String),
    /// `name = TYPE(in1, in2, ...)`; the type keyword is resolved by the
    /// builder so unknown types report the offending net
    Gate {
        output: String,
        kind: String,
        inputs: Vec<String>,
    },
}
