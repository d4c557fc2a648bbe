mod helpers;

mod account_test;
mod bookmark_test;
mod like_test;
mod recipe_test;
mod summary_test;
