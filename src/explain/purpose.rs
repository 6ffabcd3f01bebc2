//! Purpose strings for classes and functions, chosen from their names.

/// How a rule renders its purpose.
enum Purpose {
    Fixed(&'static str),
    Named(fn(&str) -> String),
}

struct PurposeRule {
    keywords: &'static [&'static str],
    purpose: Purpose,
}

impl PurposeRule {
    fn render(&self, name: &str) -> String {
        match &self.purpose {
            Purpose::Fixed(text) => (*text).to_string(),
            Purpose::Named(render) => render(name),
        }
    }
}

const fn fixed(keywords: &'static [&'static str], text: &'static str) -> PurposeRule {
    PurposeRule {
        keywords,
        purpose: Purpose::Fixed(text),
    }
}

static CLASS_RULES: &[PurposeRule] = &[
    fixed(&["node"], "Represents individual elements in linked data structures with data and pointer references"),
    fixed(&["queue"], "Implements FIFO (First In, First Out) data structure for ordered processing"),
    fixed(&["stack"], "Implements LIFO (Last In, First Out) data structure for reversible operations"),
    fixed(&["list", "linkedlist"], "Manages dynamic collections of elements with insertion and deletion capabilities"),
    fixed(&["tree"], "Implements hierarchical tree data structure for efficient searching and sorting"),
    fixed(&["graph"], "Represents network of connected nodes for pathfinding and relationship modeling"),
    fixed(&["heap"], "Implements priority queue using heap property for efficient min/max operations"),
    fixed(&["hash"], "Implements hash table for fast key-value lookups and data retrieval"),
    fixed(&["sort"], "Contains sorting algorithms to arrange data in specific order"),
    fixed(&["search"], "Implements searching algorithms to find specific elements in data collections"),
    fixed(&["solution", "solver"], "Contains problem-solving methods and algorithmic implementations"),
    PurposeRule {
        keywords: &["person", "student", "employee", "user", "customer"],
        purpose: Purpose::Named(|name| {
            format!("Models a {} entity with properties and behaviors", name.to_lowercase())
        }),
    },
    PurposeRule {
        keywords: &["car", "animal", "book", "product"],
        purpose: Purpose::Named(|name| {
            format!("Represents a {} object with attributes and methods", name.to_lowercase())
        }),
    },
    fixed(&["util", "helper"], "Provides utility functions and helper methods for common operations"),
    fixed(&["main"], "Entry point class that coordinates program execution and user interaction"),
];

static FUNCTION_RULES: &[PurposeRule] = &[
    fixed(&["palindrome", "paligdron"], "Checks if a string reads the same forwards and backwards"),
    fixed(&["substring"], "Extracts a portion of a string between specified indices"),
    fixed(&["compress"], "Compresses strings using run-length encoding (e.g., 'aaa' becomes 'a3')"),
    fixed(&["uppercase", "titlecase"], "Converts text to uppercase or title case format"),
    fixed(&["shortestpath"], "Calculates shortest distance between points using coordinate geometry"),
    fixed(&["printletters"], "Prints each character of a string individually"),
    fixed(&["factorial"], "Calculates factorial of a number (n! = n × (n-1) × ... × 1)"),
    fixed(&["fibonacci"], "Generates Fibonacci sequence where each number is sum of previous two"),
    fixed(&["prime"], "Determines if a number is prime (only divisible by 1 and itself)"),
    fixed(&["even", "odd"], "Checks if a number is even or odd using modulo operation"),
    PurposeRule {
        keywords: &["gcd", "lcm"],
        purpose: Purpose::Named(|name| format!("Calculates {} of two numbers", name.to_uppercase())),
    },
    fixed(&["enqueue"], "Adds element to rear of queue"),
    fixed(&["dequeue"], "Removes and returns element from front of queue"),
    fixed(&["push"], "Adds element to top of stack"),
    fixed(&["pop"], "Removes and returns top element from stack"),
    fixed(&["peek", "top"], "Returns top element without removing it"),
    fixed(&["isempty"], "Checks if data structure contains no elements"),
    fixed(&["isfull"], "Checks if data structure has reached maximum capacity"),
    fixed(&["bubblesort"], "Bubble Sort - repeatedly swaps adjacent elements if in wrong order"),
    fixed(&["selectionsort"], "Selection Sort - finds minimum element and places at beginning"),
    fixed(&["insertionsort"], "Insertion Sort - builds sorted array by inserting elements one by one"),
    fixed(&["mergesort"], "Merge Sort - divide and conquer sorting algorithm (O(n log n))"),
    fixed(&["quicksort"], "Quick Sort - efficient divide and conquer sorting using pivot"),
    fixed(&["binarysearch"], "Binary Search - efficiently searches sorted array (O(log n))"),
    fixed(&["linearsearch"], "Linear Search - searches by checking each element sequentially"),
    fixed(&["reverse"], "Reverses the order of elements or characters"),
    fixed(&["merge"], "Combines two sorted arrays or lists into one sorted result"),
    fixed(&["cycle"], "Detects cycles in linked lists or graphs"),
    fixed(&["middle", "mid"], "Finds middle element of data structure"),
    fixed(&["add", "insert"], "Adds new element to the data structure"),
    fixed(&["remove", "delete"], "Removes element from the data structure"),
    fixed(&["find", "search"], "Searches for specific element in the collection"),
    fixed(&["display", "print"], "Displays or prints the contents of data structure"),
    fixed(&["size", "length"], "Returns the number of elements in the collection"),
    fixed(&["clear"], "Removes all elements from the data structure"),
    fixed(&["get"], "Retrieves or accesses specific data or element"),
    fixed(&["set", "update"], "Modifies or updates existing data or element"),
];

/// Lower-case a name and drop underscores for keyword matching.
fn compact(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}

fn resolve(rules: &[PurposeRule], name: &str) -> Option<String> {
    let key = compact(name);
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| key.contains(k)))
        .map(|rule| rule.render(name))
}

/// Purpose of a class, from the first matching rule.
pub fn class_purpose(name: &str) -> String {
    resolve(CLASS_RULES, name)
        .unwrap_or_else(|| "Supporting class for program operations and data management".to_string())
}

/// Purpose of a function, from the first matching rule.
pub fn function_purpose(name: &str) -> String {
    resolve(FUNCTION_RULES, name).unwrap_or_else(|| {
        format!("Performs {} operation", name.to_lowercase().replace('_', " "))
    })
}
