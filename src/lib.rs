mod internal;
mod relay_error;
mod uniffi_exported;

pub mod prelude {
    pub use crate::internal::*;
    pub use crate::relay_error::*;
    pub use crate::uniffi_exported::*;

    pub(crate) use serde::{Deserialize, Serialize};
    pub(crate) use std::collections::HashMap;
    pub(crate) use std::sync::{Arc, Mutex, Weak};
    pub(crate) use tokio::sync::oneshot::channel;
    pub(crate) use tracing::{debug, trace, warn};
    pub(crate) use uniffi::{export, Enum, Error, Object, Record};
}

pub use prelude::*;

uniffi::setup_scaffolding!();
