//! The [`toon!`] macro for building [`crate::Value`] literals inline.

/// Builds a [`crate::Value`] from JSON-like syntax.
///
/// Strings, numbers, booleans, `null`, arrays, and objects are supported,
/// and any position may hold a Rust expression that converts into a
/// `Value`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::toon;
///
/// let user = toon!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "toon"],
///     "address": { "city": "Oslo" }
/// });
///
/// assert!(user.is_object());
/// ```
#[macro_export]
macro_rules! toon {
    ($($toon:tt)+) => {
        $crate::toon_internal!($($toon)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! toon_internal {
    //////////////////////////////////////////////////////////////////////
    // Array munching: accumulate finished elements in [..], inspect the
    // next token tree to decide how to parse the next element.
    //////////////////////////////////////////////////////////////////////

    (@array [$($elems:expr,)*]) => {
        vec![$($elems,)*]
    };
    (@array [$($elems:expr),*]) => {
        vec![$($elems),*]
    };
    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!(null),] $($rest)*)
    };
    (@array [$($elems:expr,)*] true $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!(true),] $($rest)*)
    };
    (@array [$($elems:expr,)*] false $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!(false),] $($rest)*)
    };
    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!([$($array)*]),] $($rest)*)
    };
    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!({$($map)*}),] $($rest)*)
    };
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!($next),] $($rest)*)
    };
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::toon_internal!(@array [$($elems,)* $crate::toon_internal!($last)])
    };
    (@array [$($elems:expr,)*] , $($rest:tt)*) => {
        $crate::toon_internal!(@array [$($elems,)*] $($rest)*)
    };

    //////////////////////////////////////////////////////////////////////
    // Object munching: gather key token trees before the colon, then
    // parse the value like an array element.
    //////////////////////////////////////////////////////////////////////

    (@object $object:ident () () ()) => {};
    (@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        let _ = $object.insert(($($key)+).into(), $value);
        $crate::toon_internal!(@object $object () ($($rest)*) ($($rest)*));
    };
    (@object $object:ident [$($key:tt)+] ($value:expr)) => {
        let _ = $object.insert(($($key)+).into(), $value);
    };
    (@object $object:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!(null)) $($rest)*);
    };
    (@object $object:ident ($($key:tt)+) (: true $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!(true)) $($rest)*);
    };
    (@object $object:ident ($($key:tt)+) (: false $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!(false)) $($rest)*);
    };
    (@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!([$($array)*])) $($rest)*);
    };
    (@object $object:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!({$($map)*})) $($rest)*);
    };
    (@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!($value)) , $($rest)*);
    };
    (@object $object:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::toon_internal!(@object $object [$($key)+] ($crate::toon_internal!($value)));
    };
    (@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::toon_internal!(@object $object ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////
    // Entry points.
    //////////////////////////////////////////////////////////////////////

    (null) => {
        $crate::Value::Null
    };
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };
    ([]) => {
        $crate::Value::Array(vec![])
    };
    ([ $($tt:tt)+ ]) => {
        $crate::Value::Array($crate::toon_internal!(@array [] $($tt)+))
    };
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };
    ({ $($tt:tt)+ }) => {
        $crate::Value::Object({
            let mut object = $crate::Map::new();
            $crate::toon_internal!(@object object () ($($tt)+) ($($tt)+));
            object
        })
    };
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
