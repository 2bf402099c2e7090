mod adding_a_missing_file_fails;
