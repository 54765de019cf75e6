//! Archive assembly
//!
//! The assembler lays the project out as
//!
//! ```text
//! source/<script>        every script-category file
//! resources/<name>       every other file
//! setup.py               generated build configuration
//! README.md              generated build instructions
//! .gitignore             static ignore list
//! ```
//!
//! and serializes the tree into a single compressed blob. Unlike the preview
//! path, assembly refuses to produce anything for a project without files or
//! without an entry script.

use super::defaults::{
    GITIGNORE_FILE_NAME, README_FILE_NAME, RESOURCES_DIR, SETUP_FILE_NAME, SOURCE_DIR,
};
use super::files::{FileCategory, FileRecord};
use super::readme::{render_gitignore, render_readme};
use super::request::{GenerationRequest, ResourceLayout};
use super::setup_script::render_setup_script;
use crate::exceptions::{BundleError, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::{debug, info, trace};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{Cursor, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serialization format of the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
    /// Deflate-compressed zip (the download format)
    #[default]
    Zip,
    /// Gzip-compressed tarball
    TarGz,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArchiveFormat {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar.gz" | "tgz" | "targz" => Ok(ArchiveFormat::TarGz),
            other => Err(BundleError::InvalidOption(format!(
                "unknown archive format '{other}' (expected zip or tar.gz)"
            ))),
        }
    }
}

/// Cooperative cancellation flag for a build in flight
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Shared flag, for registration with signal handlers
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

/// Finished, immutable archive
#[derive(Debug, Clone)]
pub struct ArchiveBlob {
    bytes: Vec<u8>,
    format: ArchiveFormat,
    entries: Vec<String>,
    sha256: String,
}

impl ArchiveBlob {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Entry names in archive order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Hex SHA-256 of the serialized archive
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the archive to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        debug!("💾 Wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }
}

#[derive(Debug)]
enum TreeNode {
    Dir(String),
    File { path: String, bytes: Vec<u8> },
}

/// In-memory archive tree; insertion order is entry order
#[derive(Debug, Default)]
struct ArchiveTree {
    nodes: Vec<TreeNode>,
}

impl ArchiveTree {
    fn create_dir(&mut self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains('/') {
            return Err(BundleError::ArchiveInit(format!(
                "invalid directory name '{name}'"
            )));
        }
        self.nodes.push(TreeNode::Dir(format!("{name}/")));
        Ok(())
    }

    /// Insert a file; re-inserting a path replaces its bytes in place
    fn insert(&mut self, path: String, bytes: Vec<u8>) -> Result<()> {
        if path.is_empty() || path.ends_with('/') {
            return Err(BundleError::ArchiveInit(format!(
                "invalid file path '{path}'"
            )));
        }
        // Same rule for zip and tar.gz: entries must stay inside the archive root
        if path.starts_with('/') || path.split(['/', '\\']).any(|part| part == "..") {
            return Err(BundleError::ArchiveInit(format!(
                "file path '{path}' escapes the archive root"
            )));
        }

        for node in &mut self.nodes {
            if let TreeNode::File { path: existing, bytes: slot } = node {
                if *existing == path {
                    trace!("♻️ Replacing existing entry {path}");
                    *slot = bytes;
                    return Ok(());
                }
            }
        }

        self.nodes.push(TreeNode::File { path, bytes });
        Ok(())
    }

    fn has_children(&self, dir: &str) -> bool {
        self.nodes.iter().any(|node| match node {
            TreeNode::File { path, .. } => path.starts_with(dir),
            TreeNode::Dir(_) => false,
        })
    }

    /// Nodes to serialize; directories only appear when they hold no files
    fn emitted(&self) -> Vec<&TreeNode> {
        self.nodes
            .iter()
            .filter(|node| match node {
                TreeNode::Dir(dir) => !self.has_children(dir),
                TreeNode::File { .. } => true,
            })
            .collect()
    }
}

/// Assemble the bundle as a zip archive
pub fn assemble(request: &GenerationRequest) -> Result<ArchiveBlob> {
    let never = CancelFlag::new();
    assemble_with(request, ArchiveFormat::Zip, &never)?
        .ok_or_else(|| BundleError::Generic("build cancelled".to_string()))
}

/// Assemble the bundle in `format`, honouring `cancel`.
///
/// Returns `Ok(None)` when the build was cancelled; a partial archive is
/// never produced.
pub fn assemble_with(
    request: &GenerationRequest,
    format: ArchiveFormat,
    cancel: &CancelFlag,
) -> Result<Option<ArchiveBlob>> {
    let timer = Instant::now();
    info!(
        "📦 Assembling {} bundle for '{}' ({} files)",
        format,
        request.options().app_name,
        request.files().len()
    );

    if request.is_empty() {
        return Err(BundleError::EmptyProject);
    }
    let entry = request
        .entry_script()
        .ok_or(BundleError::MissingEntryScript)?;
    debug!("🎯 Entry script: {}", entry.name);

    let mut tree = ArchiveTree::default();
    tree.create_dir(SOURCE_DIR)?;
    tree.create_dir(RESOURCES_DIR)?;

    let contents = read_contents(request.files())?;
    if cancel.is_cancelled() {
        info!("🛑 Build cancelled after reading files");
        return Ok(None);
    }

    let mut layout = ResourceLayout::default();
    for (file, bytes) in request.files().iter().zip(contents) {
        let path = match file.category {
            FileCategory::Script => format!("{SOURCE_DIR}/{}", file.name),
            FileCategory::Icon | FileCategory::Data => layout.record(file),
        };
        trace!("➕ {} ({} bytes)", path, bytes.len());
        tree.insert(path, bytes)?;
    }

    let setup = render_setup_script(request.options(), entry, &layout);
    tree.insert(SETUP_FILE_NAME.to_string(), setup.into_bytes())?;
    tree.insert(
        README_FILE_NAME.to_string(),
        render_readme(request.options()).into_bytes(),
    )?;
    tree.insert(
        GITIGNORE_FILE_NAME.to_string(),
        render_gitignore().into_bytes(),
    )?;

    if cancel.is_cancelled() {
        info!("🛑 Build cancelled before serialization");
        return Ok(None);
    }

    let nodes = tree.emitted();
    let bytes = match format {
        ArchiveFormat::Zip => write_zip(&nodes)?,
        ArchiveFormat::TarGz => write_tar_gz(&nodes)?,
    };

    let entries = nodes
        .iter()
        .map(|node| match node {
            TreeNode::Dir(path) | TreeNode::File { path, .. } => path.clone(),
        })
        .collect::<Vec<_>>();
    let sha256 = hex::encode(Sha256::digest(&bytes));

    info!(
        "✅ Bundle ready: {} entries, {} bytes, sha256 {} in {:?}",
        entries.len(),
        bytes.len(),
        sha256,
        timer.elapsed()
    );

    Ok(Some(ArchiveBlob {
        bytes,
        format,
        entries,
        sha256,
    }))
}

/// Read every record's bytes on worker threads; results keep file order
fn read_contents(files: &[FileRecord]) -> Result<Vec<Vec<u8>>> {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .clamp(1, files.len().max(1));
    let chunk_size = files.len().div_ceil(workers).max(1);
    debug!(
        "📖 Reading {} files on {} workers",
        files.len(),
        workers
    );

    let chunks: Vec<Vec<Result<Vec<u8>>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|file| file.content.read())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    vec![Err(BundleError::Generic(
                        "file read worker panicked".to_string(),
                    ))]
                })
            })
            .collect()
    });

    chunks.into_iter().flatten().collect()
}

fn archive_err(err: std::io::Error) -> BundleError {
    BundleError::ArchiveInit(err.to_string())
}

fn write_zip(nodes: &[&TreeNode]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
        .last_modified_time(zip::DateTime::default());
    let dir_options = file_options.unix_permissions(0o755);

    for node in nodes {
        match node {
            TreeNode::Dir(path) => {
                zip.add_directory(path.as_str(), dir_options)?;
            }
            TreeNode::File { path, bytes } => {
                zip.start_file(path.as_str(), file_options)?;
                zip.write_all(bytes).map_err(archive_err)?;
            }
        }
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn write_tar_gz(nodes: &[&TreeNode]) -> Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for node in nodes {
        let mut header = tar::Header::new_gnu();
        header.set_mtime(0);
        match node {
            TreeNode::Dir(path) => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                builder
                    .append_data(&mut header, path, std::io::empty())
                    .map_err(archive_err)?;
            }
            TreeNode::File { path, bytes } => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_size(bytes.len() as u64);
                header.set_mode(0o644);
                builder
                    .append_data(&mut header, path, bytes.as_slice())
                    .map_err(archive_err)?;
            }
        }
    }

    let encoder = builder.into_inner().map_err(archive_err)?;
    encoder.finish().map_err(archive_err)
}
