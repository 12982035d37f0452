// Domain-layer modules and shared errors/models
pub mod validator {
    pub use crate::validator::*;
}

pub mod checksum {
    pub use crate::checksum::*;
}

pub mod suggestions {
    pub use crate::suggestions::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
