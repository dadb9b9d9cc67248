// src/macros.rs

/// `String` shorthand.
/// `s!()` is an empty string, `s!(x)` is `String::from(x)` for anything
/// `String: From` accepts (literals, consts, `&String`, `char`).
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate two or more string slices into a new `String`:
/// `join!(SITE_ROOT, "/wiki/", name)`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $(
            out.push_str($rest);
        )+
        out
    }};
}
