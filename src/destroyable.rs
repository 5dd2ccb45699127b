// implemented by components holding subscriptions whose Rc cycles would otherwise never drop
pub trait Destroyable {
    fn destroy(&mut self);
}
