use std::any::type_name;
use std::fmt::{self, Debug, Formatter};

use crate::convention;
use crate::error::Error;
use crate::introspect;
use crate::record::{Computed, Invoker, Record};

/// A discovered compute function: which field it writes, which fields it
/// reads and how to call it.
pub struct Declaration<R: Record> {
    function: &'static str,
    output: String,
    dependencies: Vec<String>,
    invoke: Invoker<R>,
}

impl<R: Record> Declaration<R> {
    /// The name of the compute function.
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// The field the function's result is assigned to.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The fields the function reads, in parameter order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether any dependency is dirty on the record.
    ///
    /// Stops at the first dirty dependency.
    pub fn is_stale(&self, record: &R) -> bool {
        self.dependencies.iter().any(|field| record.is_dirty(field))
    }

    /// Read the current dependency values, in parameter order.
    pub fn gather(&self, record: &R) -> Result<Vec<R::Value>, Error> {
        self.dependencies
            .iter()
            .map(|field| {
                record.get_field(field).ok_or_else(|| Error::UnknownDependency {
                    record: type_name::<R>(),
                    function: self.function,
                    field: field.clone(),
                })
            })
            .collect()
    }

    /// Invoke the function with the record's current values and assign the
    /// result to the output field.
    pub fn apply(&self, record: &mut R) -> Result<(), Error> {
        let values = self.gather(record)?;
        let value = (self.invoke)(values)?;
        record.set_field(&self.output, value)
    }

    /// Whether the function reads the field it writes.
    pub fn is_self_dependent(&self) -> bool {
        self.dependencies.contains(&self.output)
    }
}

impl<R: Record> Debug for Declaration<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("function", &self.function)
            .field("output", &self.output)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// All declarations of a record type, in declaration order.
pub struct Declarations<R: Record> {
    list: Vec<Declaration<R>>,
}

impl<R: Computed> Declarations<R> {
    /// Scan the type's compute functions.
    ///
    /// Members whose name does not follow the naming convention are skipped.
    /// No check against the record's actual fields happens here.
    pub fn discover() -> Self {
        let list: Vec<_> = R::compute_functions()
            .into_iter()
            .filter_map(|function| {
                let Some(output) = convention::output_field(function.name()) else {
                    tracing::trace!(
                        record = type_name::<R>(),
                        function = function.name(),
                        "member does not name a computed attribute"
                    );
                    return None;
                };

                Some(Declaration {
                    function: function.name(),
                    output,
                    dependencies: introspect::dependencies(&function),
                    invoke: function.invoker(),
                })
            })
            .collect();

        for declaration in list.iter().filter(|d| d.is_self_dependent()) {
            tracing::warn!(
                record = type_name::<R>(),
                function = declaration.function,
                field = %declaration.output,
                "computed attribute depends on itself"
            );
        }

        tracing::debug!(
            record = type_name::<R>(),
            declarations = list.len(),
            "discovered computed attributes"
        );

        Self { list }
    }
}

impl<R: Record> Declarations<R> {
    /// Iterate over the declarations in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration<R>> {
        self.list.iter()
    }

    /// The declaration writing the given field.
    pub fn get(&self, output: &str) -> Option<&Declaration<R>> {
        self.list.iter().find(|d| d.output == output)
    }

    /// The number of declarations.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the type has no computed attributes.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<'a, R: Record> IntoIterator for &'a Declarations<R> {
    type Item = &'a Declaration<R>;
    type IntoIter = std::slice::Iter<'a, Declaration<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Record> Debug for Declarations<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(&self.list).finish()
    }
}
