use std::any::Any;

/// A value owned by a [`StateCtx`](crate::StateCtx) and addressed by its
/// type.
///
/// States are plain data, read and mutated on the UI thread through
/// [`StateCtx::update`](crate::StateCtx::update) or a
/// [`Command`](crate::Command) holding a [`Dep`](crate::Dep). Derived or
/// asynchronously produced values belong in a [`Compute`](crate::Compute)
/// cache instead.
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
