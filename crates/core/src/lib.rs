mod builder;
mod cache;
mod condition;
mod entity;
mod error;
mod generator;
mod operation;
mod options;
mod provider;
pub mod render;
mod value;

pub use builder::StatementBuilder;
pub use cache::{CacheItem, CommandMode, CommandModeCache};
pub use condition::{Comparison, ConditionGroup, QueryField, RawCondition};
pub use entity::{EntityDescriptor, Field, Order, OrderField, PropertyDescriptor};
pub use error::{BuildError, Error, MetadataError, Result};
pub use generator::{Statement, StatementGenerator};
pub use operation::Operation;
pub use options::{
    PropertyConfigurator, PropertyHandler, PropertyKey, PropertyOptions, PropertyOptionsRegistry,
};
pub use provider::{MapProvider, MetadataProvider};
pub use value::{DbType, Value};
