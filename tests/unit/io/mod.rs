mod visualization;
