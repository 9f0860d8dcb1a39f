use gallery_core::{Effect, GalleryItem, Msg};
use gallery_engine::{EngineEvent, EngineHandle, ImagePage, ImageRecord, PageRequest};
use gallery_logging::{gallery_error, gallery_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Returns messages for effects that could not be handed to the engine.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut failed = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    request_id,
                    cursor,
                    limit,
                } => {
                    gallery_info!(
                        "FetchPage request_id={} cursor={:?} limit={}",
                        request_id,
                        cursor,
                        limit
                    );
                    let sent = self.engine.fetch_page(PageRequest {
                        request_id,
                        cursor,
                        limit,
                    });
                    if !sent {
                        gallery_error!("Engine worker is gone; request {} dropped", request_id);
                        failed.push(Msg::PageFailed {
                            request_id,
                            message: "engine stopped".to_string(),
                        });
                    }
                }
            }
        }
        failed
    }

    /// Drains finished fetches without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { request_id, result } => match result {
            Ok(page) => {
                let (items, next_cursor) = map_page(page);
                Msg::PageLoaded {
                    request_id,
                    items,
                    next_cursor,
                }
            }
            Err(err) => Msg::PageFailed {
                request_id,
                message: err.to_string(),
            },
        },
    }
}

fn map_page(page: ImagePage) -> (Vec<GalleryItem>, Option<String>) {
    let items = page.items.into_iter().map(map_record).collect();
    (items, page.next_cursor)
}

fn map_record(record: ImageRecord) -> GalleryItem {
    GalleryItem::new(record.public_id, record.url)
        .with_prompt(record.prompt)
        .with_album(record.album.as_deref())
        .with_created_at(record.created_at)
}
