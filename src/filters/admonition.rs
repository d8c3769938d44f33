//! Admonition rewriter - turns labelled divs into LaTeX environments.

use crate::core::{Action, Block, Document, Filter};

/// Div classes recognized as admonitions.
pub const ADMONITIONS: [&str; 4] = ["remarque", "conseils", "attention", "definition"];

/// Returns true if `label` names a recognized admonition.
pub fn is_admonition(label: &str) -> bool {
    ADMONITIONS.contains(&label)
}

/// Rewrites `Div`s whose first class is an admonition into
/// `\begin{class}` ... `\end{class}` raw LaTeX around the div's content.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdmonitionRewriter;

impl AdmonitionRewriter {
    /// Admonition category of `block`, if it is one.
    ///
    /// A div without classes has no category.
    pub fn category(block: &Block) -> Option<&str> {
        match block {
            Block::Div(attr, _) => attr.first_class().filter(|label| is_admonition(label)),
            _ => None,
        }
    }
}

impl Filter for AdmonitionRewriter {
    fn action(&self, block: &Block, _doc: &Document) -> Action {
        let (Some(category), Block::Div(_, content)) = (Self::category(block), block) else {
            return Action::Keep;
        };
        log::debug!(
            "rewriting {} admonition ({} blocks)",
            category,
            content.len()
        );

        let mut replacement = Vec::with_capacity(content.len() + 2);
        replacement.push(Block::raw_latex(format!("\\begin{{{category}}}")));
        replacement.extend(content.iter().cloned());
        replacement.push(Block::raw_latex(format!("\\end{{{category}}}")));
        Action::Replace(replacement)
    }
}
