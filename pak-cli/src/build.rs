//! `pak build`: load entries, follow their references, merge, write.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use pak_bundle::{Anchor, Asset, AssetKind, Bundle, NodeId};
use pak_common::Url;
use pak_common::warning::{clear_warnings, warn_once};

/// Inputs of a build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Entry files, relative to the working directory.
    pub entries: Vec<PathBuf>,
    /// Directory the bundle is written to.
    pub out: PathBuf,
    /// Directory asset URLs are rooted at.
    pub root: PathBuf,
    /// Whether imported stylesheets are inlined into their importer.
    pub merge: bool,
}

/// One file written by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenAsset {
    /// The asset URL path, such as `/css/main.css`.
    pub path: String,
    /// The asset kind.
    pub kind: AssetKind,
    /// Bytes written.
    pub size: usize,
}

/// What a build did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files written, in load order.
    pub written: Vec<WrittenAsset>,
    /// Number of stylesheets inlined into their importer.
    pub merged: usize,
    /// Number of references left pointing outside the bundle.
    pub external: usize,
}

/// Run a build.
pub fn build(options: &BuildOptions) -> Result<BuildReport> {
    clear_warnings();
    if options.entries.is_empty() {
        bail!("no entry files given");
    }

    let root = if options.root.as_os_str().is_empty() {
        Path::new(".")
    } else {
        options.root.as_path()
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to open root {}", root.display()))?;

    let mut loader = Loader::new(root);
    for entry in &options.entries {
        let path = loader.url_path(entry)?;
        let _ = loader.load(&path)?;
    }
    loader.follow_references()?;

    let mut bundle = loader.bundle;
    let merged = if options.merge {
        merge_stylesheets(&mut bundle)
    } else {
        0
    };

    let written = write_bundle(&bundle, &options.out)?;
    Ok(BuildReport {
        written,
        merged,
        external: loader.external,
    })
}

/// Loads assets breadth first, once per URL path.
struct Loader {
    root: PathBuf,
    bundle: Bundle,
    loaded: HashMap<String, NodeId>,
    queue: VecDeque<NodeId>,
    external: usize,
}

impl Loader {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            bundle: Bundle::new(),
            loaded: HashMap::new(),
            queue: VecDeque::new(),
            external: 0,
        }
    }

    /// The rooted URL path of an entry file.
    fn url_path(&self, entry: &Path) -> Result<String> {
        let file = entry
            .canonicalize()
            .with_context(|| format!("failed to open {}", entry.display()))?;
        let Ok(relative) = file.strip_prefix(&self.root) else {
            bail!(
                "{} is outside the root {}",
                entry.display(),
                self.root.display()
            );
        };

        let mut path = String::new();
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                path.push('/');
                path.push_str(&segment.to_string_lossy());
            }
        }
        Ok(path)
    }

    fn file(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Read and parse the asset at `path`, unless it is already loaded.
    fn load(&mut self, path: &str) -> Result<NodeId> {
        if let Some(&id) = self.loaded.get(path) {
            return Ok(id);
        }

        let file = self.file(path);
        let bytes = fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
        let asset = Asset::from_bytes(Url::from_path(path), &bytes)
            .with_context(|| format!("failed to parse {}", file.display()))?;

        let id = self.bundle.add(asset);
        let _ = self.loaded.insert(path.to_string(), id);
        self.queue.push_back(id);
        Ok(id)
    }

    /// Relate every reference of every queued asset, loading the local
    /// files they reach.
    fn follow_references(&mut self) -> Result<()> {
        while let Some(id) = self.queue.pop_front() {
            let Some(asset) = self.bundle.asset(id) else {
                continue;
            };
            let from = asset.url().path.clone();
            let references = asset.references();

            for reference in references {
                if reference.url.is_absolute() || !reference.url.host.is_empty() {
                    self.external += 1;
                    continue;
                }
                let path = reference.url.path.clone();
                if !self.loaded.contains_key(&path) && !self.file(&path).is_file() {
                    warn_once("build", &format!("{path} not found, referenced from {from}"));
                    continue;
                }
                let target = self.load(&path)?;
                let _ = self.bundle.relate(id, target, reference);
            }
        }
        Ok(())
    }
}

/// Inline stylesheets into their importer until none qualifies.
///
/// A stylesheet is inlined when its only incoming reference is an `@import`
/// from another stylesheet, it imports nothing itself, and that `@import`
/// is the last one of the importer. Rules never end up ahead of an
/// `@import` that way.
fn merge_stylesheets(bundle: &mut Bundle) -> usize {
    let mut merged = 0;
    let mut refused = HashSet::new();
    while let Some((target, source)) = next_merge(bundle, &refused) {
        if bundle.merge(target, source) {
            merged += 1;
            continue;
        }
        if let Some(asset) = bundle.asset(source) {
            warn_once("build", &format!("could not merge {}", asset.url().path));
        }
        let _ = refused.insert(source);
    }
    merged
}

fn next_merge(bundle: &Bundle, refused: &HashSet<NodeId>) -> Option<(NodeId, NodeId)> {
    bundle.assets().find_map(|source| {
        if refused.contains(&source) {
            return None;
        }
        let Some(Asset::Css(css)) = bundle.asset(source) else {
            return None;
        };
        if !css.stylesheet.imports().is_empty() {
            return None;
        }
        let incoming = bundle.incoming(source);
        let &[(edge, target)] = incoming.as_slice() else {
            return None;
        };
        if target == source {
            return None;
        }
        let Some(Asset::Css(importer)) = bundle.asset(target) else {
            return None;
        };
        let Anchor::Import(cell) = &bundle.reference(edge)?.anchor else {
            return None;
        };
        let last = importer.stylesheet.imports().last()?.url.same_cell(cell);
        last.then_some((target, source))
    })
}

/// Write every asset under `out` at its URL path.
fn write_bundle(bundle: &Bundle, out: &Path) -> Result<Vec<WrittenAsset>> {
    let mut written = Vec::new();
    for id in bundle.assets() {
        let Some(asset) = bundle.asset(id) else {
            continue;
        };
        let path = asset.url().path.clone();
        let file = out.join(path.trim_start_matches('/'));
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let data = asset.data();
        fs::write(&file, &data).with_context(|| format!("failed to write {}", file.display()))?;
        written.push(WrittenAsset {
            path,
            kind: asset.kind(),
            size: data.len(),
        });
    }
    Ok(written)
}
