use crate::errors::KapigraphError;
use crate::graph::Relationships;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeStyle {
    #[default]
    Ortho,
    Curved,
    Polyline,
    Spline,
}

impl EdgeStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeStyle::Ortho => "ortho",
            EdgeStyle::Curved => "curved",
            EdgeStyle::Polyline => "polyline",
            EdgeStyle::Spline => "spline",
        }
    }
}

impl FromStr for EdgeStyle {
    type Err = KapigraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ortho" => Ok(EdgeStyle::Ortho),
            "curved" => Ok(EdgeStyle::Curved),
            "polyline" => Ok(EdgeStyle::Polyline),
            "spline" => Ok(EdgeStyle::Spline),
            other => Err(KapigraphError::Visualization(format!("unknown splines style '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DotOptions {
    pub name: String,
    /// Graphviz layout engine hint (`dot`, `neato`, `fdp`, ...).
    pub layout: String,
    pub splines: EdgeStyle,
    pub overlap: bool,
    pub shape: String,
    pub fontsize: u32,
    pub font: Option<String>,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            name: "kapitan".to_string(),
            layout: "dot".to_string(),
            splines: EdgeStyle::Ortho,
            overlap: false,
            shape: "rect".to_string(),
            fontsize: 9,
            font: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Generate DOT with default options.
    #[must_use]
    pub fn generate_dot(&self, relationships: &Relationships) -> String {
        self.generate_dot_with_options(relationships, &DotOptions::default())
    }

    /// Generate DOT with one `entity -> parent` edge per direct parent, sorted.
    #[must_use]
    pub fn generate_dot_with_options(
        &self,
        relationships: &Relationships,
        opts: &DotOptions,
    ) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "digraph \"{}\" {{", escape_id(&opts.name));
        let _ = writeln!(
            s,
            "  graph [fontsize={}, layout={}, splines={}, overlap={}];",
            opts.fontsize,
            escape_attr(&opts.layout),
            opts.splines.as_str(),
            opts.overlap
        );
        let _ = write!(s, "  node [shape={}", escape_attr(&opts.shape));
        if let Some(font) = &opts.font {
            let _ = write!(s, ", fontname=\"{}\"", escape_id(font));
        }
        s.push_str("];\n");
        s.push_str("  edge [arrowhead=normal];\n");

        for (entity, parent) in relationships.edges() {
            let _ = writeln!(s, "  \"{}\" -> \"{}\";", escape_id(entity), escape_id(parent));
        }
        s.push_str("}\n");
        s
    }
}

#[derive(Debug, Default)]
pub struct SvgGenerator;

impl SvgGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Render the graph to SVG using Graphviz.
    ///
    /// # Errors
    /// Returns `KapigraphError::Visualization` as for [`SvgGenerator::render_dot`].
    pub fn generate_svg_with_options(
        &self,
        relationships: &Relationships,
        opts: &DotOptions,
    ) -> Result<String, KapigraphError> {
        let dot = DotGenerator::new().generate_dot_with_options(relationships, opts);
        self.render_dot(&dot)
    }

    /// Pipe already generated DOT text through `dot -Tsvg`.
    ///
    /// # Errors
    /// Returns `KapigraphError::Visualization` if invoking Graphviz fails,
    /// if the process exits with a non-success status, or if its output is not valid UTF-8.
    pub fn render_dot(&self, dot: &str) -> Result<String, KapigraphError> {
        let output = std::process::Command::new("dot")
            .arg("-Tsvg")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .and_then(|mut child| {
                use std::io::Write;
                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(dot.as_bytes())?;
                }
                child.wait_with_output()
            })
            .map_err(|e| {
                KapigraphError::Visualization(format!("Failed to run graphviz 'dot': {e}"))
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KapigraphError::Visualization(format!(
                "Graphviz 'dot' failed with code {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| KapigraphError::Visualization(format!("Invalid UTF-8 from dot: {e}")))
    }
}

// Escape for use inside a double-quoted DOT identifier
fn escape_id(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// Attribute values written bare must stay a single DOT token
fn escape_attr(s: &str) -> String {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        s.to_string()
    } else {
        format!("\"{}\"", escape_id(s))
    }
}
