/// A newsletter member whose email passed the presence check.
///
/// The address is already trimmed but its format is not checked here;
/// that belongs to whichever service stores the member.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsletterMember {
    pub email: String,
}
