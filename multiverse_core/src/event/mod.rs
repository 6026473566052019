pub mod core_events;
pub mod world_events;

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    pin::Pin,
    sync::Arc,
};

use log::trace;
use tokio::sync::RwLock;

pub trait Event<R: Clone + Send + Sync + 'static>: Send + Sync + 'static {}

type ErasedEvent = Arc<dyn Any + Send + Sync>;
type ErasedResult = Option<Box<dyn Any + Send + Sync>>;
type Handler =
    Box<dyn Fn(ErasedEvent) -> Pin<Box<dyn Future<Output = ErasedResult> + Send>> + Send + Sync>;

struct Listener {
    /// Lazy listeners run detached; their results are never collected.
    lazy: bool,
    handler: Handler,
}

//
// Listeners receive the event by Arc. Don't hold a registry or property lock across a dispatch.
//

#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<HashMap<TypeId, Vec<Listener>>>,
}

impl EventBus {
    pub async fn listen<E, R, F, Fut>(&self, lazy: bool, callback: F)
    where
        E: Event<R>,
        R: Clone + Send + Sync + 'static,
        F: Fn(Arc<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<R>> + Send + 'static,
    {
        let callback = Arc::new(callback);
        let handler: Handler = Box::new(move |event: ErasedEvent| {
            let callback = Arc::clone(&callback);
            Box::pin(async move {
                let event = event.downcast::<E>().ok()?;
                callback(event)
                    .await
                    .map(|result| Box::new(result) as Box<dyn Any + Send + Sync>)
            }) as Pin<Box<dyn Future<Output = ErasedResult> + Send>>
        });

        self.listeners
            .write()
            .await
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Listener { lazy, handler });
    }

    /// Runs every listener of `E`. The result of the last eager listener that returned one wins.
    pub async fn dispatch<E: Event<R>, R: Clone + Send + Sync + 'static>(
        &self,
        event: &Arc<E>,
    ) -> Option<R> {
        let listeners = self.listeners.read().await;
        let mut eager = Vec::new();

        for listener in listeners.get(&TypeId::of::<E>()).into_iter().flatten() {
            let erased: ErasedEvent = Arc::clone(event) as ErasedEvent;
            let future = (listener.handler)(erased);
            if listener.lazy {
                tokio::spawn(future);
            } else {
                eager.push(future);
            }
        }
        drop(listeners);

        trace!("Dispatching {}", std::any::type_name::<E>());

        let mut last_result = None;
        for future in eager {
            if let Some(result) = future.await {
                if let Ok(result) = result.downcast::<R>() {
                    last_result = Some(*result);
                }
            }
        }

        last_result
    }
}
