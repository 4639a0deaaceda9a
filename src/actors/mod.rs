mod sink_actor;
#[cfg(test)]
mod tests;

pub use sink_actor::SinkActor;
