// Static archive the C SPL links against. Only the bare-metal ARM build
// carries the entry points; host builds produce an empty archive.

#![cfg_attr(target_os = "none", no_std)]

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod entry;
