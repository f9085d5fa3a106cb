use async_trait::async_trait;

/// Turns a URL into the markdown that should replace it.
///
/// Returning `None` leaves the URL untouched. Implementations handle their
/// own failures (network errors, bad payloads) and report them as `None`;
/// the rewriter has no error path for a resolver.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, url: &str) -> Option<String>;
}

#[async_trait]
impl<T: Resolve + ?Sized> Resolve for std::sync::Arc<T> {
    async fn resolve(&self, url: &str) -> Option<String> {
        (**self).resolve(url).await
    }
}

#[async_trait]
impl<T: Resolve + ?Sized> Resolve for Box<T> {
    async fn resolve(&self, url: &str) -> Option<String> {
        (**self).resolve(url).await
    }
}
