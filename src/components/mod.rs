pub mod file_navigator;
pub mod file_viewer;
pub mod git_sync_modal;
pub mod git_sync_modal_test;
pub mod toast;
pub mod toolbar;

pub use file_navigator::FileNavigator;
pub use file_viewer::FileViewer;
pub use git_sync_modal::GitSyncModal;
pub use toast::ToastContainer;
pub use toolbar::Toolbar;
