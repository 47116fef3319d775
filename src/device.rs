use crate::InputKind;

/// Anything that produces input deltas for the local capture side.
pub trait Device: Send {
    fn poll(&mut self) -> Vec<InputKind>;
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}
