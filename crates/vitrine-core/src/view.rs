//! One render pass over a filtered product list.
//!
//! Cards are built synchronously. Every card without a local image then gets
//! its own scrape task, tied to an abort token owned by the view: cancelling
//! or dropping the view stops in-flight requests and discards their results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::catalog::Product;
use crate::config::VitrineConfig;
use crate::meta::{self, CurlMetaSource, MetaSource, ScrapeOptions};
use crate::render::{self, apply_scrape_outcome, initial_card_state, CardState, Node};

/// What a view needs to build cards and resolve thumbnails.
#[derive(Clone)]
pub struct RenderContext {
    pub image_dir: String,
    pub source: Arc<dyn MetaSource>,
    /// When false, cards without a local image stay in the loading state.
    pub scrape: bool,
}

impl RenderContext {
    pub fn new(image_dir: impl Into<String>, source: Arc<dyn MetaSource>) -> Self {
        Self {
            image_dir: image_dir.into(),
            source,
            scrape: true,
        }
    }

    /// libcurl-backed context using the proxy and timeouts from `cfg`.
    pub fn from_config(cfg: &VitrineConfig) -> Self {
        let source = CurlMetaSource::new(ScrapeOptions::from(cfg));
        Self::new(cfg.image_dir.clone(), Arc::new(source))
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("image_dir", &self.image_dir)
            .field("scrape", &self.scrape)
            .finish_non_exhaustive()
    }
}

struct Card {
    product: Product,
    state: Arc<Mutex<CardState>>,
    abort: Option<Arc<AtomicBool>>,
    handle: Option<JoinHandle<()>>,
}

fn lock(state: &Mutex<CardState>) -> MutexGuard<'_, CardState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Cards of one filter result and their scrape tasks.
pub struct ResultsView {
    cards: Vec<Card>,
    cancelled: bool,
}

impl ResultsView {
    /// Builds every card, then starts the scrapes. Must run inside a tokio runtime
    /// when any card needs a scrape.
    pub fn build<'a, I>(products: I, ctx: &RenderContext) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let (mut cards, needs_scrape): (Vec<Card>, Vec<bool>) = products
            .into_iter()
            .map(|p| {
                let (state, needs_scrape) = initial_card_state(p, &ctx.image_dir);
                let card = Card {
                    product: p.clone(),
                    state: Arc::new(Mutex::new(state)),
                    abort: None,
                    handle: None,
                };
                (card, needs_scrape)
            })
            .unzip();

        if ctx.scrape {
            for (card, _) in cards.iter_mut().zip(needs_scrape).filter(|(_, n)| *n) {
                let abort = Arc::new(AtomicBool::new(false));
                card.handle = Some(spawn_scrape(
                    card.product.clone(),
                    Arc::clone(&card.state),
                    Arc::clone(&ctx.source),
                    Arc::clone(&abort),
                ));
                card.abort = Some(abort);
            }
        }

        Self {
            cards,
            cancelled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Products shown, in display order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.cards.iter().map(|c| &c.product)
    }

    /// Current state of every card, in display order.
    pub fn states(&self) -> Vec<CardState> {
        self.cards.iter().map(|c| lock(&c.state).clone()).collect()
    }

    /// Number of scrape tasks still running.
    pub fn pending(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false))
            .count()
    }

    /// Renders the results container as it looks right now.
    pub fn snapshot(&self) -> Node {
        render::results_node(
            self.cards
                .iter()
                .map(|c| render::card_node(&c.product, &lock(&c.state)))
                .collect(),
        )
    }

    /// Stops every scrape of this view. Card states stay as they are.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        let mut stopped = 0usize;
        for card in &mut self.cards {
            if let Some(abort) = card.abort.take() {
                abort.store(true, Ordering::Relaxed);
            }
            if let Some(handle) = card.handle.take() {
                if !handle.is_finished() {
                    stopped += 1;
                }
                handle.abort();
            }
        }
        if stopped > 0 {
            tracing::debug!(stopped, "cancelled stale scrapes");
        }
    }

    /// Waits for every scrape task of this view to finish.
    pub async fn settle(&mut self) {
        for card in &mut self.cards {
            if let Some(handle) = card.handle.take() {
                if let Err(e) = handle.await {
                    if !e.is_cancelled() {
                        tracing::warn!("scrape task failed: {}", e);
                    }
                }
            }
            card.abort = None;
        }
    }
}

impl Drop for ResultsView {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_scrape(
    product: Product,
    state: Arc<Mutex<CardState>>,
    source: Arc<dyn MetaSource>,
    abort: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = tokio::task::spawn_blocking({
            let link = product.link().map(str::to_string);
            let abort = Arc::clone(&abort);
            move || meta::scrape(source.as_ref(), link.as_deref(), &abort)
        })
        .await;

        if abort.load(Ordering::Relaxed) {
            tracing::debug!(link = product.link().unwrap_or(""), "discarding cancelled scrape");
            return;
        }
        let mut state = lock(&state);
        match outcome {
            Ok(outcome) => apply_scrape_outcome(&mut state, &product, outcome),
            Err(e) => {
                tracing::warn!("scrape worker failed: {}", e);
                state.thumb = render::Thumb::Unavailable;
            }
        }
    })
}
