// Logic faults: states that should be unreachable if the reconciler and the rules engine agree.
// They are logged rather than propagated, so a confused engine never takes the board down.

#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Reconciler fault at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Reconciler fault at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_internal_error {
    ($($arg:tt)*) => {
        log::error!("{}", $crate::internal_error_message!($($arg)*))
    };
}


#[cfg(test)]
mod tests {
    #[test]
    fn message_names_location() {
        let message = internal_error_message!("lost {} moves", 2);
        assert!(message.starts_with("Reconciler fault at src/error.rs:"), "{message}");
        assert!(message.ends_with(": lost 2 moves."), "{message}");
        assert!(internal_error_message!().ends_with('.'));
    }
}
