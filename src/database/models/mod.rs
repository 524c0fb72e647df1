pub mod article;
pub mod comment;
pub mod product;
pub mod user;

pub use article::{Article, ArticleChanges, ArticleDetail, NewArticle};
pub use comment::{Comment, NewComment};
pub use product::{NewProduct, Product, ProductChanges};
pub use user::{NewUser, User, UserChanges, UserProfile};
