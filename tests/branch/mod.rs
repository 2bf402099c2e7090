mod create_branch;
