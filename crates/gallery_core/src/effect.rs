use crate::RequestId;

/// IO requested by [`crate::update`]; executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page from the image list endpoint.
    FetchPage {
        request_id: RequestId,
        cursor: Option<String>,
        limit: u32,
    },
}
