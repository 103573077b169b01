use crate::record::{ComputeFunction, Record};

/// The fields a compute function depends on, in parameter order.
///
/// Values are later passed positionally, so the order is significant.
pub fn dependencies<R: Record>(function: &ComputeFunction<R>) -> Vec<String> {
    function.params().iter().map(|param| field_name(param)).collect()
}

/// Map a parameter name to the field it reads.
///
/// Raw identifiers like `r#type` read the field `type`.
fn field_name(param: &str) -> String {
    param.strip_prefix("r#").unwrap_or(param).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Plain;

    impl Record for Plain {
        type Value = u32;

        fn is_dirty(&self, _: &str) -> bool {
            false
        }

        fn get_field(&self, _: &str) -> Option<u32> {
            None
        }

        fn set_field(&mut self, _: &str, _: u32) -> Result<(), Error> {
            Ok(())
        }
    }

    fn sum(values: Vec<u32>) -> Result<u32, Error> {
        Ok(values.into_iter().sum())
    }

    #[test]
    fn test_parameter_order() {
        let function = ComputeFunction::<Plain>::new(
            "compute_total_attribute",
            &["net", "tax", "r#type"],
            sum,
        );
        assert_eq!(dependencies(&function), ["net", "tax", "type"]);
    }

    #[test]
    fn test_no_parameters() {
        let function = ComputeFunction::<Plain>::new("compute_zero_attribute", &[], sum);
        assert!(dependencies(&function).is_empty());
    }
}
