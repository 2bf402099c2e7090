mod reinit_existing_repository_fails;
