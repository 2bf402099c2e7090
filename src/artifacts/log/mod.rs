//! Commit history traversal
//!
//! - `rev_list`: first-parent walk used by `log`

pub mod rev_list;
