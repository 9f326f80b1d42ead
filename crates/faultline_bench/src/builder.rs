use crate::ast::{Netlist, Statement};
use crate::error::{BenchError, Result};
use faultline_core::{Circuit, GateKind};

/// Builds a wired `Circuit` from a parsed netlist.
///
/// Statements are replayed in source order onto the core circuit builder,
/// which performs name resolution at the end, so forward references
/// (an `OUTPUT` line before its driving gate) are fine.
pub fn build_circuit(netlist: &Netlist) -> Result<Circuit> {
    let mut builder = Circuit::builder();

    for stmt in &netlist.statements {
        match stmt {
            Statement::Input(name) => builder.add_input(name.clone()),
            Statement::Output(name) => builder.mark_output(name.clone()),
            Statement::Gate {
                output,
                kind,
                inputs,
            } => {
                let kind =
                    GateKind::from_name(kind).ok_or_else(|| BenchError::UnknownGateType {
                        net: output.clone(),
                        kind: kind.clone(),
                    })?;
                builder.add_gate(output.clone(), kind, inputs.clone());
            }
        }
    }

    Ok(builder.build()?)
}
