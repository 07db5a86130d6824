pub mod comments;
pub mod posts;
pub mod todos;
pub mod users;

pub mod prelude {
    pub use super::comments::Entity as Comments;
    pub use super::posts::Entity as Posts;
    pub use super::todos::Entity as Todos;
    pub use super::users::Entity as Users;
}
