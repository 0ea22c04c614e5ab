//! UI Components
//!
//! Pages and wizard steps of the 4Q frontend.

mod account_bar;
mod account_page;
mod background_picker;
mod category_selector;
mod create_wizard;
mod info_form;
mod tag_select_modal;
mod ticket_composer;
mod ticket_list;
mod ticket_result;
mod toast_host;

pub use account_bar::AccountBar;
pub use account_page::AccountPage;
pub use create_wizard::CreateWizard;
pub use ticket_list::MyTickets;
pub use ticket_result::TicketResult;
pub use toast_host::ToastHost;
