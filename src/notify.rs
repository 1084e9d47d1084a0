use colored::*;

/// Fire-and-forget notification surface. The crawl never blocks on or
/// polls a notification; failures to display are silently irrelevant.
#[cfg_attr(test, mockall::automock)]
pub trait Notify: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Prints notifications as colored status lines on stdout.
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        println!("{} {}", format!("[{}]", title).blue().bold(), message);
    }
}
