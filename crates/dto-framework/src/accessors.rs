/// Generates typed accessors over a DTO's `Option<_>` field storage.
///
/// For every primitive field `f: F` this adds `f() -> Option<&F>`,
/// `set_f(impl Into<F>)` and `unset_f()`. For every object field `o: O`
/// (stored as `Option<Box<O>>`, where `O` may be `dyn Trait`) it adds
/// `o() -> Option<&O>`, `set_o(impl Into<Box<O>>)` and `unset_o()`.
///
/// Setters write the field directly; they do not go through coercion or
/// resolution. Use [`Dto::set`](crate::Dto::set) to assign raw values.
///
/// ```rust
/// #[derive(Default)]
/// struct Point {
///     x: Option<i64>,
///     label: Option<Box<String>>,
/// }
///
/// dto_framework::accessors!(Point { x: i64 } objects { label: String });
///
/// let mut point = Point::default();
/// point.set_x(3).set_label("origin".to_string());
/// assert_eq!(point.x(), Some(&3));
/// assert_eq!(point.label().map(String::as_str), Some("origin"));
/// point.unset_x();
/// assert_eq!(point.x(), None);
/// ```
#[macro_export]
macro_rules! accessors {
    (
        $ty:ident { $($field:ident : $fty:ty),* $(,)? }
        $(objects { $($ofield:ident : $oty:ty),* $(,)? })?
    ) => {
        $crate::__private::paste! {
            impl $ty {
                $(
                    pub fn $field(&self) -> Option<&$fty> {
                        self.$field.as_ref()
                    }

                    pub fn [<set_ $field>](&mut self, value: impl Into<$fty>) -> &mut Self {
                        self.$field = Some(value.into());
                        self
                    }

                    pub fn [<unset_ $field>](&mut self) -> &mut Self {
                        self.$field = None;
                        self
                    }
                )*
                $($(
                    pub fn $ofield(&self) -> Option<&$oty> {
                        self.$ofield.as_deref()
                    }

                    pub fn [<set_ $ofield>](&mut self, value: impl Into<Box<$oty>>) -> &mut Self {
                        self.$ofield = Some(value.into());
                        self
                    }

                    pub fn [<unset_ $ofield>](&mut self) -> &mut Self {
                        self.$ofield = None;
                        self
                    }
                )*)?
            }
        }
    };
}
