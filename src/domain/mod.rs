mod builtin;
mod descriptor;
mod schema;
mod value;

pub use builtin::{
    builtin_schemas, data_path_config, database_config, eric_config, frequency_limit_config,
    function_config, is_mysql, mysql_config, path_config,
};
pub use descriptor::{
    DefaultText, DescriptorError, FieldDescriptor, UNSET_PLACEHOLDER, describe_schema,
};
pub use schema::{
    ConfigSchema, DefaultFactory, FieldDefault, FieldDefinition, FieldKind, ScalarKind,
};
pub use value::{TypedValue, ValueMap};
