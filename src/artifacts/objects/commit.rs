//! Commit object
//!
//! Commits are immutable snapshots of the tracked files. Each one records:
//! - The tree: a mapping of relative paths to blob IDs
//! - Parent commit ID(s): none for the root, two for a merge
//! - A timestamp with its UTC offset
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! blob <blob-sha> <path>
//! parent <parent-sha>
//! timestamp <unix-seconds> <+hhmm>
//!
//! <commit message>
//! ```
//!
//! Tree lines are sorted by path, so equal snapshots hash equally.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;

/// Message of the commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable pinning the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Snapshot of tracked files: relative path to blob ID
pub type CommitTree = BTreeMap<PathBuf, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what graph walks need, so it can be cached cheaply.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    /// Tracked files of this snapshot
    tree: CommitTree,
    timestamp: DateTime<FixedOffset>,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree: CommitTree,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree,
            timestamp,
            message,
        }
    }

    /// The parentless, empty commit dated at the Unix epoch
    pub fn root() -> Self {
        Commit::new(
            vec![],
            CommitTree::new(),
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            ROOT_COMMIT_MESSAGE.to_string(),
        )
    }

    /// Timestamp for a new commit
    ///
    /// Reads `TWIG_COMMIT_DATE` (`%Y-%m-%d %H:%M:%S %z`) when set, otherwise
    /// uses the local clock truncated to whole seconds.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| DateTime::parse_from_str(&date_str, COMMIT_DATE_FORMAT).ok())
            .unwrap_or_else(|| {
                let now = Local::now().fixed_offset();
                now.with_nanosecond(0).unwrap_or(now)
            })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree(&self) -> &CommitTree {
        &self.tree
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the one `log` follows
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Blob tracked at `path`, if any
    pub fn blob_at(&self, path: &std::path::Path) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
        }
    }

    fn header_lines(&self) -> anyhow::Result<Vec<String>> {
        let mut lines = vec![];

        for (path, oid) in &self.tree {
            let path = path
                .to_str()
                .with_context(|| format!("Non UTF-8 path in commit tree: {}", path.display()))?;
            lines.push(format!("blob {oid} {path}"));
        }
        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));

        Ok(lines)
    }

    // `<unix-seconds> <+hhmm>`
    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(value, "%s %z")
            .with_context(|| format!("Invalid commit object: malformed timestamp {value}"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = self.header_lines()?;
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        frame(self.object_type(), object_content.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut tree = CommitTree::new();
        let mut parents = Vec::new();
        let mut timestamp = None;

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line}"))?;

            match key {
                "blob" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed blob line")?;
                    tree.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(Self::parse_timestamp(value)?),
                _ => anyhow::bail!("Invalid commit object: unknown header {key}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Self::new(parents, tree, timestamp, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
