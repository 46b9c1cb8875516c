//! Inversion about the mean.

use qff_ir::{Circuit, IrResult};

use super::{CARRIER, controls};

/// Append the diffuser `2|s⟩⟨s| - I`.
///
/// Does not depend on the target.
pub fn apply_diffuser(circuit: &mut Circuit) -> IrResult<()> {
    circuit.h_all()?.x_all()?;

    circuit.h(CARRIER)?;
    circuit.mcx(&controls(), CARRIER)?;
    circuit.h(CARRIER)?;

    circuit.x_all()?.h_all()?;
    Ok(())
}
