/// One tracked symbol extracted from a dependency manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Bare symbol identifier as declared.
    pub name: String,
    /// Root-relative label of the manifest this came from, e.g. `deps.ts`.
    pub origin: String,
    /// Set once the name is seen in any non-manifest source file. Only ever
    /// transitions false to true within a run.
    pub used: bool,
    /// Locates the declaration line when the manifest is rewritten.
    pub pattern: LinePattern,
}

/// Declaration-line matcher derived from the shape that produced a
/// declaration. Matches the originating line, not occurrences of the name
/// elsewhere in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinePattern {
    /// Two-space-indented name inside a formatter-expanded export block.
    Continuation(String),
    /// The `export * from <name>` forwarding form of an aliased star export.
    StarForward(String),
    /// Exact member of a one-line `{ ... }` export list.
    Bare(String),
}

/// Outcome of a full check run.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Every declaration in collection order: main manifest first, then the
    /// test manifest, each in parse order.
    pub declarations: Vec<Declaration>,
    /// Number of source files the scanner read.
    pub files_scanned: usize,
}

impl CheckResult {
    /// Declarations never seen in the scanned tree, in collection order.
    pub fn unused(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| !d.used)
    }

    pub fn has_unused(&self) -> bool {
        self.declarations.iter().any(|d| !d.used)
    }
}
