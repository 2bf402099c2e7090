mod merge_ancestor_and_fast_forward;
mod merge_guards;
