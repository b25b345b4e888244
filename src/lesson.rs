//! Static lesson content: theory, worked examples and the downloadable documents.

use serde::Serialize;

pub const LESSON_TITLE: &str = "Numere complexe — Lecție (bază)";
pub const TEX_FILE_NAME: &str = "lectie_numere_complexe.tex";
pub const TEXT_FILE_NAME: &str = "lectie_numere_complexe.txt";

/// One displayable line of a theory section.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
  Latex(&'static str),
  Markdown(&'static str),
}

#[derive(Clone, Debug, Serialize)]
pub struct Section {
  pub title: &'static str,
  pub blocks: Vec<Block>,
}

pub fn theory() -> Vec<Section> {
  vec![
    Section {
      title: "Definiție",
      blocks: vec![
        Block::Latex(r"z = a + bi, \; a,b \in \mathbb{R}, \; i^2 = -1"),
        Block::Markdown(r"**Partea reală:** $\Re z = a$"),
        Block::Markdown(r"**Partea imaginară:** $\Im z = b$"),
      ],
    },
    Section {
      title: "Operații",
      blocks: vec![
        Block::Latex(r"(a+bi) + (c+di) = (a+c) + (b+d)i"),
        Block::Latex(r"(a+bi)(c+di) = (ac - bd) + (ad+bc)i"),
        Block::Latex(r"\overline{z} = a - bi"),
        Block::Latex(r"|z| = \sqrt{a^2 + b^2}"),
      ],
    },
    Section {
      title: "Exemple",
      blocks: vec![
        Block::Latex(r"(2+3i) + (1-4i) = 3 - i"),
        Block::Latex(r"(2+3i)(1-4i) = 14 - 5i"),
      ],
    },
  ]
}

pub const LESSON_TEX: &str = r"\documentclass[12pt]{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath,amssymb,amsthm}
\title{Numere complexe — Lecție (bază)}
\begin{document}
\maketitle
\section*{Definiție}
$z = a + bi,\ a,b \in \mathbb{R},\ i^2 = -1$
\section*{Operații}
$(a+bi) + (c+di) = (a+c) + (b+d)i$

$(a+bi)(c+di) = (ac-bd) + (ad+bc)i$

Conjugat: $\overline{z} = a-bi$

Modul: $|z| = \sqrt{a^2+b^2}$
\section*{Exemple}
$(2+3i) + (1-4i) = 3 - i$

$(2+3i)(1-4i) = 14 - 5i$
\end{document}
";

/// Plain-text rendering of the lesson.
pub fn lesson_text() -> String {
  let mut out = format!("{LESSON_TITLE}\n");
  out.push_str(
    "\nDefiniție:\n\
     z = a + bi, a,b ∈ R, i^2 = -1\n\
     Partea reală: Re z = a\n\
     Partea imaginară: Im z = b\n\
     \nOperații:\n\
     (a+bi) + (c+di) = (a+c) + (b+d)i\n\
     (a+bi)(c+di) = (ac-bd) + (ad+bc)i\n\
     Conjugat: z̄ = a - bi\n\
     Modul: |z| = sqrt(a^2 + b^2)\n\
     \nExemple:\n\
     (2+3i) + (1-4i) = 3 - i\n\
     (2+3i)(1-4i) = 14 - 5i\n",
  );
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::engine::{format_complex, Exercise};
  use num_complex::Complex64;

  #[test]
  fn worked_examples_agree_with_the_engine() {
    let ex = Exercise::from_operands(Complex64::new(2.0, 3.0), Complex64::new(1.0, -4.0));
    assert_eq!(format_complex(ex.sum), "3-1i");
    assert_eq!(format_complex(ex.product), "14-5i");
    let examples = &theory()[2];
    assert!(matches!(examples.blocks[0], Block::Latex(t) if t.ends_with("= 3 - i")));
    assert!(matches!(examples.blocks[1], Block::Latex(t) if t.ends_with("= 14 - 5i")));
  }

  #[test]
  fn documents_carry_the_examples() {
    assert!(LESSON_TEX.starts_with(r"\documentclass"));
    assert!(LESSON_TEX.trim_end().ends_with(r"\end{document}"));
    let text = lesson_text();
    assert!(text.starts_with(LESSON_TITLE));
    assert!(text.contains("(2+3i)(1-4i) = 14 - 5i"));
  }

  #[test]
  fn theory_has_three_sections() {
    let t = theory();
    assert_eq!(t.iter().map(|s| s.title).collect::<Vec<_>>(), ["Definiție", "Operații", "Exemple"]);
    let json = serde_json::to_value(&t[0].blocks[0]).expect("json");
    assert_eq!(json["kind"], "latex");
  }
}
