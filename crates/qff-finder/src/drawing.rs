//! Text rendering of circuits.
//!
//! One row per qubit plus a classical row. Instructions are packed into
//! columns so that no two share a row or cross each other's vertical
//! connector, and long diagrams are folded into blocks.

use qff_ir::{Circuit, Instruction, InstructionKind};

/// Default fold width in characters.
pub const DEFAULT_FOLD: usize = 150;

const QUANTUM_WIRE: char = '─';
const CLASSICAL_WIRE: char = '═';

struct Column {
    width: usize,
    cells: Vec<Option<&'static str>>,
}

impl Column {
    fn new(rows: usize) -> Self {
        Self {
            width: 1,
            cells: vec![None; rows],
        }
    }

    fn set(&mut self, row: usize, symbol: &'static str) {
        self.width = self.width.max(symbol.chars().count());
        self.cells[row] = Some(symbol);
    }

    /// Rendered width including one wire character on each side.
    fn span(&self) -> usize {
        self.width + 2
    }

    fn render(&self, row: usize, fill: char, out: &mut String) {
        out.push(fill);
        match self.cells[row] {
            Some(sym) => {
                let pad = self.width - sym.chars().count();
                let left = pad / 2;
                out.extend(std::iter::repeat_n(fill, left));
                out.push_str(sym);
                out.extend(std::iter::repeat_n(fill, pad - left));
            }
            None => out.extend(std::iter::repeat_n(fill, self.width)),
        }
        out.push(fill);
    }
}

/// Rows an instruction occupies, inclusive, with the classical row last.
fn row_span(inst: &Instruction, classical_row: usize) -> (usize, usize) {
    let lo = inst.qubits.iter().map(|q| q.index()).min().unwrap_or(0);
    let hi = if inst.is_measure() {
        classical_row
    } else {
        inst.qubits.iter().map(|q| q.index()).max().unwrap_or(0)
    };
    (lo, hi)
}

fn place(column: &mut Column, inst: &Instruction, classical_row: usize) {
    let (lo, hi) = row_span(inst, classical_row);
    let operand = |row: usize| inst.qubits.iter().any(|q| q.index() == row);

    match &inst.kind {
        InstructionKind::Gate(gate) => {
            let target = inst.target().map(|q| q.index());
            for row in lo..=hi {
                let is_target = Some(row) == target;
                match gate {
                    g if g.is_controlled_x() => {
                        if is_target {
                            column.set(row, "⊕");
                        } else if operand(row) {
                            column.set(row, "■");
                        } else {
                            column.set(row, "┼");
                        }
                    }
                    g if g.is_controlled_z() => {
                        column.set(row, if operand(row) { "■" } else { "┼" });
                    }
                    single => {
                        if operand(row) {
                            column.set(row, single.label());
                        }
                    }
                }
            }
        }
        InstructionKind::Measure => {
            for row in lo..hi {
                column.set(row, if operand(row) { "M" } else { "╫" });
            }
            column.set(classical_row, "╩");
        }
    }
}

/// Pack instructions into columns.
fn columns(circuit: &Circuit, rows: usize, classical_row: usize) -> Vec<Column> {
    let mut level = vec![0usize; rows];
    let mut columns: Vec<Column> = vec![];

    for inst in circuit.instructions() {
        let (lo, hi) = row_span(inst, classical_row);
        let col = level[lo..=hi].iter().copied().max().unwrap_or(0);
        if col == columns.len() {
            columns.push(Column::new(rows));
        }
        place(&mut columns[col], inst, classical_row);
        level[lo..=hi].iter_mut().for_each(|l| *l = col + 1);
    }

    columns
}

/// Render `circuit` as text, folded so no line exceeds `fold` characters.
///
/// A `fold` of 0 disables folding. Blocks after the first start with `«`
/// and every block but the last ends with `»`.
pub fn draw_circuit(circuit: &Circuit, fold: usize) -> String {
    let num_qubits = circuit.num_qubits();
    let has_classical = circuit.num_clbits() > 0;
    let rows = num_qubits + usize::from(has_classical);
    // Measurements need classical bits, so the fallback is never a measure target.
    let classical_row = if has_classical {
        num_qubits
    } else {
        num_qubits.saturating_sub(1)
    };

    let mut prefixes: Vec<String> = (0..num_qubits).map(|i| format!("q_{i}: ")).collect();
    if has_classical {
        prefixes.push(format!("c: {}/", circuit.num_clbits()));
    }
    let prefix_width = prefixes.iter().map(|p| p.chars().count()).max().unwrap_or(0);
    let prefixes: Vec<String> = prefixes
        .into_iter()
        .map(|p| format!("{p:>prefix_width$}"))
        .collect();

    let columns = columns(circuit, rows, classical_row);

    // Split columns into blocks that fit, each holding at least one column.
    let mut blocks: Vec<&[Column]> = vec![];
    let mut start = 0;
    while start < columns.len() {
        let mut width = prefix_width + 2;
        let mut end = start;
        while end < columns.len() {
            let next = width + columns[end].span();
            if fold > 0 && end > start && next > fold {
                break;
            }
            width = next;
            end += 1;
        }
        blocks.push(&columns[start..end]);
        start = end;
    }
    if blocks.is_empty() {
        blocks.push(&[]);
    }

    let last = blocks.len() - 1;
    let mut out = String::new();
    for (b, block) in blocks.iter().enumerate() {
        if b > 0 {
            out.push('\n');
        }
        for (row, prefix) in prefixes.iter().enumerate() {
            let fill = if has_classical && row == classical_row {
                CLASSICAL_WIRE
            } else {
                QUANTUM_WIRE
            };
            if b > 0 {
                out.push('«');
            }
            out.push_str(prefix);
            for column in block.iter() {
                column.render(row, fill, &mut out);
            }
            if b < last {
                out.push('»');
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::grover_circuit;
    use crate::target::TargetIndex;
    use qff_ir::QubitId;

    #[test]
    fn test_bell_diagram() {
        let circuit = Circuit::bell().unwrap();
        let text = draw_circuit(&circuit, DEFAULT_FOLD);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("q_0: "));
        assert!(lines[0].contains('H'));
        assert!(lines[0].contains('■'));
        assert!(lines[1].contains('⊕'));
        assert!(lines[0].contains('M') && lines[1].contains('M'));
        assert!(lines[2].starts_with("c: 2/"));
        assert!(lines[2].contains('╩'));
    }

    #[test]
    fn test_connector_crossing_moves_gates_apart() {
        let mut circuit = Circuit::with_size("cross", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.h(QubitId(1)).unwrap();

        let text = draw_circuit(&circuit, 0);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "q_1: ─┼──H─");
    }

    #[test]
    fn test_grover_folds_at_width() {
        let circuit = grover_circuit(TargetIndex::new(5).unwrap(), 6).unwrap();
        let text = draw_circuit(&circuit, DEFAULT_FOLD);

        assert!(text.lines().all(|l| l.chars().count() <= DEFAULT_FOLD));
        let blocks = text.split("\n\n").count();
        assert!(blocks > 1);
        assert_eq!(text.lines().filter(|l| !l.is_empty()).count(), blocks * 11);
        assert!(text.lines().any(|l| l.starts_with("« q_0: ")));
    }

    #[test]
    fn test_unfolded_is_single_block() {
        let circuit = grover_circuit(TargetIndex::MIN, 1).unwrap();
        let text = draw_circuit(&circuit, 0);
        assert_eq!(text.lines().count(), 11);
        assert!(!text.contains('»'));
    }
}
