//! Static Helvetica width table and greedy word wrap for PDF output.
//!
//! Widths are in em units (AFM widths / 1000). Non-ASCII characters fall back to
//! an average width; when an embedded TTF replaces Helvetica the same table is an
//! approximation, absorbed by `WRAP_SAFETY_MARGIN`.
//! Index = (char as usize) - 32.

/// Fraction of the line width kept free so approximate metrics never overflow.
pub const WRAP_SAFETY_MARGIN: f32 = 0.03;

pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Greedy word wrap of a single paragraph. Words wider than a full line are
    /// split at character boundaries. An empty paragraph yields one empty line.
    pub fn wrap_paragraph(&self, paragraph: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            for piece in self.split_long_word(word, max_width_em) {
                let piece_w = self.measure_str(&piece);
                let space_w = if current.is_empty() { 0.0 } else { self.space_width };

                if !current.is_empty() && current_width + space_w + piece_w > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    current_width += self.space_width;
                }
                current.push_str(&piece);
                current_width += piece_w;
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Wraps multi-paragraph text; each `\n` starts a new paragraph.
    pub fn wrap_text(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let usable = max_width_em * (1.0 - WRAP_SAFETY_MARGIN);
        text.lines()
            .flat_map(|paragraph| self.wrap_paragraph(paragraph, usable))
            .collect()
    }

    fn split_long_word(&self, word: &str, max_width_em: f32) -> Vec<String> {
        if self.measure_str(word) <= max_width_em {
            return vec![word.to_string()];
        }
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if !piece.is_empty() && width + w > max_width_em {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0     1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :     ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A     B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N     O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [     \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a     b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n     o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {     |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.56,
    space_width: 0.278,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_widths() {
        assert!((HELVETICA.measure_str("a") - 0.556).abs() < f32::EPSILON);
        assert!((HELVETICA.measure_str("Wi") - (0.944 + 0.222)).abs() < 1e-6);
        // Non-ASCII falls back to the average width.
        assert!((HELVETICA.measure_str("ş") - HELVETICA.average_char_width).abs() < f32::EPSILON);
    }

    #[test]
    fn test_short_paragraph_is_one_line() {
        let lines = HELVETICA.wrap_paragraph("Dear Hiring Manager,", 40.0);
        assert_eq!(lines, vec!["Dear Hiring Manager,".to_string()]);
    }

    #[test]
    fn test_wrapped_lines_fit_width() {
        let text = "I am writing to express my strong interest in the Senior Rust Engineer \
                    position at your company. Over the past six years I have built distributed \
                    systems, high-throughput APIs and tooling used by hundreds of engineers.";
        let max = 20.0;
        let lines = HELVETICA.wrap_paragraph(text, max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(HELVETICA.measure_str(line) <= max, "line too wide: {line}");
        }
        // Nothing lost or reordered.
        assert_eq!(
            lines.join(" "),
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        );
    }

    #[test]
    fn test_long_word_is_split() {
        let word = "a".repeat(100);
        let lines = HELVETICA.wrap_paragraph(&word, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let lines = HELVETICA.wrap_text("Dear team,\n\nThanks.", 40.0);
        assert_eq!(lines, vec!["Dear team,", "", "Thanks."]);
    }
}
