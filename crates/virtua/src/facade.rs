//! The common shape every top-level facade (`List`, `Table`, `Tree`)
//! presents to a host runtime (§5 companion, §4.10).
//!
//! A facade is still just `init`/`update`/`view` underneath; this trait
//! exists so [`crate::runtime::Runtime`] can drive any of the three
//! without being generic over which engine crate backs it.

use virtua_proto::{Cmd, Msg};
use virtua_source::DataSource;
use virtua_viewport::AnimationTicker;

pub trait Facade<T> {
    fn init(&mut self) -> Cmd;
    fn update(&mut self, msg: Msg<T>) -> Cmd;
    fn view(&self) -> String;
    fn data_source(&self) -> &(dyn DataSource<T> + Send + Sync);
    fn animation(&self) -> &AnimationTicker;
}
