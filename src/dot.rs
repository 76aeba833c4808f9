//! This module contains the conversion from an automaton to the graphviz
//! dot format.

use std::io::Write;

use dot_writer::{Attributes, DotWriter, RankDirection};
use itertools::Itertools;

use crate::{Automaton, StateId};

/// Render the automaton's transition graph to a graphviz dot format.
///
/// The start state is drawn in blue, final states in red, dummy gap-filler
/// states in gray. Edges are labeled with their transition keys, class keys
/// with the `W`/`N`/`$` symbols.
pub fn render_to<W: Write>(automaton: &Automaton, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for (index, state) in automaton.states().iter().enumerate() {
        let source_id = {
            let mut source_node = digraph.node_auto();
            if state.is_dummy() {
                source_node
                    .set_label(&format!("{} (dummy)", index))
                    .set_color(dot_writer::Color::Grey);
            } else {
                source_node.set_label(&index.to_string());
            }
            if StateId::new(index) == StateId::START {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Blue)
                    .set_pen_width(3.0);
            }
            if state.is_final() {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Red)
                    .set_pen_width(3.0);
            }
            source_node.id()
        };
        // Sort the edges by their key text so the output is deterministic.
        for (key, target) in state
            .transitions()
            .iter()
            .sorted_by_key(|(key, _)| key.to_string())
        {
            digraph
                .edge(
                    source_id.clone(),
                    &format!("node_{}", target.as_usize()),
                )
                .attributes()
                .set_label(&format!("{}", key).escape_default().to_string());
        }
    }
}
