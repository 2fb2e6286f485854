//! Layering lint for the pet registry backend.
//!
//! Rules are data: each [`Rule`] names a scope (a layer or a single file
//! under `backend/src`) and a dependency that scope must not take. The lint
//! parses every source in `domain`, `inbound`, `outbound` and `middleware`
//! with `syn`, collects the paths it names and reports each broken rule.
//!
//! Test code (items under `#[cfg(test)]` and files such as `tests.rs`) may
//! name driven ports when wiring mocks; module and crate rules still apply.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};

/// Backend layers the lint understands, keyed by top-level directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Domain,
    Inbound,
    Outbound,
    Middleware,
}

impl Layer {
    const ALL: [Self; 4] = [Self::Domain, Self::Inbound, Self::Outbound, Self::Middleware];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Middleware => "middleware",
        }
    }

    fn of(file: &Path) -> Option<Self> {
        let first = file.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == first)
    }
}

/// Where a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Layer(Layer),
    /// One file, relative to `backend/src`.
    File(&'static str),
}

impl Scope {
    fn covers(self, file: &Path) -> bool {
        match self {
            Self::Layer(layer) => Layer::of(file) == Some(layer),
            Self::File(path) => file == Path::new(path),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer(layer) => write!(f, "{}", layer.dir()),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

/// A dependency a scope may be barred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// A backend module anywhere along a `crate::` path.
    Module(&'static str),
    /// An external crate root.
    Crate(&'static str),
    /// A named item, matched on the final path segment. Test code is exempt.
    Item(&'static str),
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(name) => write!(f, "crate::{name}"),
            Self::Crate(name) => write!(f, "external crate `{name}`"),
            Self::Item(name) => write!(f, "`{name}`"),
        }
    }
}

/// One layering constraint.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub scope: Scope,
    pub forbids: Dependency,
    pub reason: &'static str,
}

const fn rule(scope: Scope, forbids: Dependency, reason: &'static str) -> Rule {
    Rule {
        scope,
        forbids,
        reason,
    }
}

const DOMAIN: Scope = Scope::Layer(Layer::Domain);
const INBOUND: Scope = Scope::Layer(Layer::Inbound);
const OUTBOUND: Scope = Scope::Layer(Layer::Outbound);
const MIDDLEWARE: Scope = Scope::Layer(Layer::Middleware);
const GUARD: Scope = Scope::File("domain/authorization.rs");
const COMPOSER: Scope = Scope::File("domain/pet_search.rs");

const ADAPTER_FREE: &str = "the domain reaches infrastructure only through ports";
const FRAMEWORK_FREE: &str = "the domain stays independent of HTTP, storage and hashing crates";
const NO_STORAGE: &str = "inbound adapters reach storage only through the domain";
const DRIVING_ONLY: &str = "handlers call driving ports, never driven ones";
const NO_HTTP: &str = "outbound adapters know nothing of the HTTP surface";

/// The rules enforced on `backend/src`.
pub const RULES: &[Rule] = &[
    rule(DOMAIN, Dependency::Module("inbound"), ADAPTER_FREE),
    rule(DOMAIN, Dependency::Module("outbound"), ADAPTER_FREE),
    rule(DOMAIN, Dependency::Module("middleware"), ADAPTER_FREE),
    rule(DOMAIN, Dependency::Crate("actix"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("actix_web"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("actix_session"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("utoipa"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("diesel"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("diesel_async"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("diesel_migrations"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("bb8"), FRAMEWORK_FREE),
    rule(DOMAIN, Dependency::Crate("argon2"), FRAMEWORK_FREE),
    rule(
        GUARD,
        Dependency::Module("ports"),
        "ownership is decided from the caller and the record alone",
    ),
    rule(GUARD, Dependency::Crate("tokio"), "the guard is synchronous"),
    rule(
        COMPOSER,
        Dependency::Item("UserRepository"),
        "listings read the pet store only",
    ),
    rule(
        COMPOSER,
        Dependency::Item("BreedRepository"),
        "listings read the pet store only",
    ),
    rule(
        COMPOSER,
        Dependency::Item("PasswordHasher"),
        "listings read the pet store only",
    ),
    rule(INBOUND, Dependency::Module("outbound"), NO_STORAGE),
    rule(INBOUND, Dependency::Crate("diesel"), NO_STORAGE),
    rule(INBOUND, Dependency::Crate("diesel_async"), NO_STORAGE),
    rule(INBOUND, Dependency::Crate("diesel_migrations"), NO_STORAGE),
    rule(INBOUND, Dependency::Crate("bb8"), NO_STORAGE),
    rule(INBOUND, Dependency::Crate("argon2"), NO_STORAGE),
    rule(INBOUND, Dependency::Item("PetRepository"), DRIVING_ONLY),
    rule(INBOUND, Dependency::Item("UserRepository"), DRIVING_ONLY),
    rule(INBOUND, Dependency::Item("BreedRepository"), DRIVING_ONLY),
    rule(INBOUND, Dependency::Item("PasswordHasher"), DRIVING_ONLY),
    rule(OUTBOUND, Dependency::Module("inbound"), NO_HTTP),
    rule(OUTBOUND, Dependency::Module("middleware"), NO_HTTP),
    rule(OUTBOUND, Dependency::Crate("actix"), NO_HTTP),
    rule(OUTBOUND, Dependency::Crate("actix_web"), NO_HTTP),
    rule(OUTBOUND, Dependency::Crate("actix_session"), NO_HTTP),
    rule(OUTBOUND, Dependency::Crate("utoipa"), NO_HTTP),
    rule(
        MIDDLEWARE,
        Dependency::Module("outbound"),
        "request middleware is storage-agnostic",
    ),
    rule(
        MIDDLEWARE,
        Dependency::Crate("diesel"),
        "request middleware is storage-agnostic",
    ),
];

/// A broken rule in one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Why a lint run did not pass.
#[derive(Debug)]
pub enum LintError {
    Io(io::Error),
    Parse { file: PathBuf, message: String },
    Violations(Vec<Violation>),
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "reading backend sources failed: {err}"),
            Self::Parse { file, message } => {
                write!(f, "{} does not parse: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} layering violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "  {violation}"))
            }
        }
    }
}

impl std::error::Error for LintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A source file handed to the lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

impl SourceFile {
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }

    fn is_test_code(&self) -> bool {
        self.file
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| {
                matches!(name, "tests.rs" | "test_utils.rs" | "fixtures.rs")
                    || name.ends_with("_tests.rs")
            })
    }
}

/// Read and lint `backend_dir/src`.
pub fn lint_backend(backend_dir: &Path) -> Result<(), LintError> {
    let src = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src.join(layer.dir());
        if dir.is_dir() {
            read_sources(&src, &dir, &mut sources)?;
        }
    }
    lint(&sources, RULES)
}

/// Check `sources` against `rules`.
pub fn lint(sources: &[SourceFile], rules: &[Rule]) -> Result<(), LintError> {
    let mut violations = BTreeSet::new();
    for source in sources {
        let parsed = syn::parse_file(&source.contents).map_err(|err| LintError::Parse {
            file: source.file.clone(),
            message: err.to_string(),
        })?;
        let mut names = NameCollector::default();
        names.visit_file(&parsed);
        let whole_file_is_test = source.is_test_code();

        for rule in rules.iter().filter(|rule| rule.scope.covers(&source.file)) {
            if names.breaks(rule.forbids, whole_file_is_test) {
                violations.insert(Violation {
                    file: source.file.clone(),
                    message: format!(
                        "{} must not depend on {} ({})",
                        rule.scope, rule.forbids, rule.reason
                    ),
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations.into_iter().collect()))
    }
}

fn read_sources(src: &Path, dir: &Path, out: &mut Vec<SourceFile>) -> Result<(), LintError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(fs::DirEntry::path);
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            read_sources(src, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let relative = path.strip_prefix(src).unwrap_or(&path).to_path_buf();
            out.push(SourceFile::new(relative, fs::read_to_string(&path)?));
        }
    }
    Ok(())
}

const SELF_RELATIVE: [&str; 3] = ["crate", "self", "super"];
const CRATE_NAME: &str = "pet_registry";

/// A path named in a file, split into segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NamedPath {
    segments: Vec<String>,
    in_test: bool,
}

impl NamedPath {
    /// Segments of a path into this crate, with any `crate::`/`super::` or
    /// crate-name prefix removed. `None` for external paths.
    fn internal(&self) -> Option<&[String]> {
        let first = self.segments.first()?.as_str();
        if SELF_RELATIVE.contains(&first) {
            let start = self
                .segments
                .iter()
                .position(|segment| !SELF_RELATIVE.contains(&segment.as_str()))?;
            return Some(&self.segments[start..]);
        }
        if first == CRATE_NAME {
            return Some(&self.segments[1..]);
        }
        Layer::ALL
            .iter()
            .any(|layer| layer.dir() == first)
            .then_some(self.segments.as_slice())
    }

    fn passes_through_module(&self, module: &str) -> bool {
        let Some(internal) = self.internal() else {
            return false;
        };
        // The last segment names an item unless the path stops at a module.
        let modules = match internal.len() {
            0 | 1 => internal,
            len => &internal[..len - 1],
        };
        modules.iter().any(|segment| segment == module)
    }

    fn external_root(&self) -> Option<&str> {
        if self.internal().is_some() {
            return None;
        }
        self.segments.first().map(String::as_str)
    }

    fn names_item(&self, item: &str) -> bool {
        self.segments.last().is_some_and(|last| last == item)
    }
}

#[derive(Default)]
struct NameCollector {
    paths: BTreeSet<NamedPath>,
    test_depth: usize,
}

impl NameCollector {
    fn breaks(&self, dependency: Dependency, whole_file_is_test: bool) -> bool {
        self.paths.iter().any(|path| match dependency {
            Dependency::Module(module) => path.passes_through_module(module),
            Dependency::Crate(root) => path.external_root() == Some(root),
            Dependency::Item(item) => {
                !(whole_file_is_test || path.in_test) && path.names_item(item)
            }
        })
    }

    fn record(&mut self, segments: Vec<String>) {
        if !segments.is_empty() {
            self.paths.insert(NamedPath {
                segments,
                in_test: self.test_depth > 0,
            });
        }
    }

    fn record_use(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.record(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.record(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.record(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use(item, prefix.clone());
                }
            }
        }
    }

    fn gated<F>(&mut self, attrs: &[syn::Attribute], walk: F)
    where
        F: FnOnce(&mut Self),
    {
        let test_only = attrs.iter().any(|attr| {
            attr.path().is_ident("cfg")
                && attr
                    .parse_args::<syn::Ident>()
                    .is_ok_and(|ident| ident == "test")
        });
        self.test_depth += usize::from(test_only);
        walk(self);
        self.test_depth -= usize::from(test_only);
    }
}

impl<'ast> Visit<'ast> for NameCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        self.record(
            node.segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect(),
        );
        visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.gated(&node.attrs, |this| this.record_use(&node.tree, Vec::new()));
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        self.gated(&node.attrs, |this| visit::visit_item_mod(this, node));
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.gated(&node.attrs, |this| visit::visit_item_fn(this, node));
    }

    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        self.gated(&node.attrs, |this| visit::visit_item_impl(this, node));
    }
}

#[cfg(test)]
mod tests;
