mod copy_button;
mod session_list;

pub use copy_button::CopyButton;
pub use session_list::SessionListView;
