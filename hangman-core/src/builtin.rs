use hangman_types::WordDifficulty::{self, Easy, Hard, Medium};

type CategoryLists = &'static [(WordDifficulty, &'static [&'static str])];

// The first entry is the default category.
pub(crate) static BUILTIN_CATEGORIES: &[(&str, CategoryLists)] = &[
    (
        "general",
        &[
            (Easy, &["CAT", "DOG", "SUN", "HAT", "TREE", "BOOK", "FISH", "MOON", "CAKE", "BALL"]),
            (
                Medium,
                &["GARDEN", "PLANET", "BRIDGE", "CASTLE", "JUNGLE", "POCKET", "WINTER", "ROCKET", "SILVER", "BASKET"],
            ),
            (
                Hard,
                &["JAZZ", "SPHINX", "RHYTHM", "QUIZZICAL", "BYZANTINE", "AWKWARD", "ZEPHYR", "KNAPSACK", "OXYGEN", "PNEUMONIA"],
            ),
        ],
    ),
    (
        "animals",
        &[
            (Easy, &["COW", "PIG", "OWL", "BEAR", "FROG", "LION", "DUCK", "GOAT", "WOLF", "DEER"]),
            (
                Medium,
                &["GIRAFFE", "DOLPHIN", "PENGUIN", "RABBIT", "MONKEY", "TURTLE", "BEAVER", "FALCON", "GORILLA", "HAMSTER"],
            ),
            (
                Hard,
                &["AXOLOTL", "PLATYPUS", "CHAMELEON", "ARMADILLO", "WILDEBEEST", "ORANGUTAN", "PANGOLIN", "NARWHAL", "CHINCHILLA", "HIPPOPOTAMUS"],
            ),
        ],
    ),
    (
        "food",
        &[
            (Easy, &["PIE", "JAM", "EGG", "RICE", "SOUP", "MILK", "CORN", "PEAR", "PLUM", "BEAN"]),
            (
                Medium,
                &["BUTTER", "CHEESE", "NOODLE", "PEPPER", "TOMATO", "WAFFLE", "MUFFIN", "CARROT", "BISCUIT", "PANCAKE"],
            ),
            (
                Hard,
                &["QUINOA", "ZUCCHINI", "ASPARAGUS", "BRUSCHETTA", "GNOCCHI", "KOHLRABI", "PROSCIUTTO", "SAUERKRAUT", "WORCESTERSHIRE", "BOUILLABAISSE"],
            ),
        ],
    ),
    (
        "countries",
        &[
            (Easy, &["PERU", "CHAD", "CUBA", "IRAN", "MALI", "OMAN", "FIJI", "LAOS", "TOGO", "IRAQ"]),
            (
                Medium,
                &["CANADA", "BRAZIL", "FRANCE", "NORWAY", "MEXICO", "SWEDEN", "GREECE", "TURKEY", "POLAND", "KENYA"],
            ),
            (
                Hard,
                &["KYRGYZSTAN", "MOZAMBIQUE", "LIECHTENSTEIN", "AZERBAIJAN", "MADAGASCAR", "UZBEKISTAN", "BANGLADESH", "MAURITANIA", "DJIBOUTI", "ZIMBABWE"],
            ),
        ],
    ),
    (
        "technology",
        &[
            (Easy, &["CHIP", "DISK", "CODE", "BYTE", "WIFI", "APP", "WEB", "BUG", "RAM", "USB"]),
            (
                Medium,
                &["KERNEL", "SERVER", "ROUTER", "BINARY", "PYTHON", "MODEM", "LAPTOP", "BROWSER", "COMPILER", "NETWORK"],
            ),
            (
                Hard,
                &["CRYPTOGRAPHY", "HYPERVISOR", "ASYNCHRONOUS", "MICROPROCESSOR", "BLOCKCHAIN", "POLYMORPHISM", "JAVASCRIPT", "FIRMWARE", "BANDWIDTH", "QUBIT"],
            ),
        ],
    ),
];
