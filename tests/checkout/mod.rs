mod checkout_with_untracked_files;
