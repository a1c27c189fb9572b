//! Classification of transformed results as usable or empty.
//!
//! Empty means absent (`None`), `false`, or a sequence whose length is zero.
//! Numbers are never empty: a zero is a legitimate result.

use serde_json::Value;

/// Decides whether a produced value counts as "no usable result".
pub trait Emptiness {
    /// True when the value should trigger another attempt.
    fn is_empty_result(&self) -> bool;
}

impl Emptiness for str {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Emptiness> Emptiness for Option<T> {
    fn is_empty_result(&self) -> bool {
        self.as_ref().is_none_or(Emptiness::is_empty_result)
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    fn is_empty_result(&self) -> bool {
        (**self).is_empty_result()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Box<T> {
    fn is_empty_result(&self) -> bool {
        (**self).is_empty_result()
    }
}

impl Emptiness for bool {
    fn is_empty_result(&self) -> bool {
        !*self
    }
}

impl Emptiness for Value {
    fn is_empty_result(&self) -> bool {
        match self {
            Value::Null | Value::Bool(false) => true,
            Value::String(text) => text.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Bool(true) | Value::Number(_) | Value::Object(_) => false,
        }
    }
}

macro_rules! never_empty {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Emptiness for $ty {
                fn is_empty_result(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_empty!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_and_sequences_use_length() {
        assert!("".is_empty_result());
        assert!(!"x".is_empty_result());
        assert!(String::new().is_empty_result());
        assert!(Vec::<u8>::new().is_empty_result());
        assert!(!vec![0u8].is_empty_result());
    }

    #[test]
    fn options_are_empty_when_absent_or_inner_empty() {
        assert!(None::<String>.is_empty_result());
        assert!(Some(String::new()).is_empty_result());
        assert!(!Some("ok".to_string()).is_empty_result());
    }

    #[test]
    fn zero_is_a_result() {
        assert!(!0_i64.is_empty_result());
        assert!(!0.0_f64.is_empty_result());
        assert!(!json!(0).is_empty_result());
    }

    #[test]
    fn json_values() {
        assert!(json!(null).is_empty_result());
        assert!(json!(false).is_empty_result());
        assert!(json!("").is_empty_result());
        assert!(json!([]).is_empty_result());
        assert!(!json!({}).is_empty_result());
        assert!(!json!(["a"]).is_empty_result());
    }
}
