/// Feature-flag provider consumed by the router to gate rollout rules.
pub trait FeatureFlags: Send + Sync {
    fn is_active(&self, flag: &str) -> bool;
}
