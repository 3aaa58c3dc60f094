pub mod guest_list_queries;
