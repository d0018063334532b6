use crate::Value;

/// How one result-set column feeds one member of the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    /// Name of the column, after renaming for dynamic rows.
    pub column_name: String,
    /// Position of the column in the cursor.
    pub ordinal: usize,
    /// Index of the target member, `None` for dynamic rows.
    pub member: Option<usize>,
    /// Value type the member receives.
    pub value_type: Value,
    pub nullable: bool,
    /// The cursor value must be cast before it reaches the member.
    pub requires_unboxing: bool,
    /// Representation accepted by the member conversion, when it is built
    /// `From` another type.
    pub alternate: Option<Value>,
    /// Rust type of the member, used in reports.
    pub type_name: &'static str,
}

impl ColumnBinding {
    /// The value type the column must be compatible with.
    pub fn expected(&self) -> &Value {
        self.alternate.as_ref().unwrap_or(&self.value_type)
    }
}
