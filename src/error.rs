use thiserror::Error;

/// Errors raised while fetching or registering a typeface.
///
/// These never abort rendering; provisioning logs them and moves on.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("request for {family} failed: {reason}")]
    Network { family: String, reason: String },

    #[error("request for {family} timed out after {millis}ms")]
    Timeout { family: String, millis: u128 },

    #[error("data for {family} is not a usable font: {reason}")]
    InvalidData { family: String, reason: String },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("scale {0} is outside the supported range 0.25..=4")]
    InvalidScale(f32),

    #[error("could not allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing has been rendered yet")]
    NotRendered,

    #[error("an export is already in progress")]
    Busy,

    #[error("could not allocate the {format} export surface")]
    Surface { format: &'static str },

    #[error("{format} encoding failed: {reason}")]
    Encode { format: &'static str, reason: String },
}
