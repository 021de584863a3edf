// Topic model — trait-based abstraction over the offline-trained model.
//
// The TopicModel trait defines the interface the wrapper talks to.
// BundleModel implements it by serving a trained bundle from disk; other
// backends can be added behind the same trait and selected by configuration.

pub mod bundle;
pub mod traits;
