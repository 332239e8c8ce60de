use crate::fonts::FontCache;
use crate::views::ViewStore;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub fonts: Arc<FontCache>,
    pub views: ViewStore,
    pub tera: Arc<Tera>,
}

impl AppState {
    pub fn new(fonts: Arc<FontCache>, tera: Tera) -> Self {
        Self {
            views: ViewStore::new(fonts.clone()),
            fonts,
            tera: Arc::new(tera),
        }
    }
}
