//! LaTeX and HTML table rendering
//!
//! Output follows the layout pandas produces for `to_latex(index=False)`
//! and `to_html(index=False)`, which is what Quarto documents expect.

use itertools::Itertools;

/// A rendered-to-text table: column names, alignment and cell strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    pub headers: Vec<String>,
    /// Right-align the column (numeric data)
    pub right_align: Vec<bool>,
    pub rows: Vec<Vec<String>>,
}

/// Escape LaTeX special characters
#[must_use]
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash "),
            '~' => out.push_str(r"\textasciitilde "),
            '^' => out.push_str(r"\textasciicircum "),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Escape HTML special characters
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl TextTable {
    /// booktabs `tabular` environment with escaped cells
    #[must_use]
    pub fn to_latex(&self) -> String {
        let align: String = self
            .right_align
            .iter()
            .map(|&right| if right { 'r' } else { 'l' })
            .collect();
        let mut out = String::new();
        out.push_str(&format!("\\begin{{tabular}}{{{align}}}\n"));
        out.push_str("\\toprule\n");
        out.push_str(&format!("{} \\\\\n", self.headers.iter().map(|h| escape_latex(h)).join(" & ")));
        out.push_str("\\midrule\n");
        for row in &self.rows {
            out.push_str(&format!("{} \\\\\n", row.iter().map(|c| escape_latex(c)).join(" & ")));
        }
        out.push_str("\\bottomrule\n");
        out.push_str("\\end{tabular}\n");
        out
    }

    /// `<table class="dataframe">` markup with escaped cells
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table border=\"1\" class=\"dataframe\">\n");
        out.push_str("  <thead>\n");
        out.push_str("    <tr style=\"text-align: right;\">\n");
        for header in &self.headers {
            out.push_str(&format!("      <th>{}</th>\n", escape_html(header)));
        }
        out.push_str("    </tr>\n");
        out.push_str("  </thead>\n");
        out.push_str("  <tbody>\n");
        for row in &self.rows {
            out.push_str("    <tr>\n");
            for cell in row {
                out.push_str(&format!("      <td>{}</td>\n", escape_html(cell)));
            }
            out.push_str("    </tr>\n");
        }
        out.push_str("  </tbody>\n");
        out.push_str("</table>");
        out
    }
}
