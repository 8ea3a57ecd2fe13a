pub mod blog_post;
pub mod click;
pub mod coupon_record;
pub mod store_record;

pub use blog_post::Entity as BlogPostEntity;
pub use click::Entity as ClickEntity;
pub use coupon_record::Entity as CouponRecordEntity;
pub use store_record::Entity as StoreRecordEntity;
