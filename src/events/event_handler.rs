/// Stateful consumer of a stream of events, see `EventObserver::subscribe_handler`.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
